//! The in-progress game snapshot, so a closed terminal can pick up where it left off.

use directories::ProjectDirs;
use ladder_core::{GameState, state_hash};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{APP_NAME, format_snapshot_hash, unix_time_ms};

pub const SESSION_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    pub format_version: u32,
    pub seed: u64,
    pub snapshot_hash_hex: String,
    pub snapshot: GameState,
    pub updated_at_unix_ms: u64,
}

impl SessionFile {
    pub fn capture(seed: u64, snapshot: &GameState) -> Self {
        Self {
            format_version: SESSION_FORMAT_VERSION,
            seed,
            snapshot_hash_hex: format_snapshot_hash(state_hash(snapshot)),
            snapshot: snapshot.clone(),
            updated_at_unix_ms: unix_time_ms(),
        }
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("session.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    /// Loads a session, rejecting unknown versions and snapshots whose hash no longer matches.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let session: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if session.format_version != SESSION_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported session format version {}", session.format_version),
            ));
        }
        let expected = format_snapshot_hash(state_hash(&session.snapshot));
        if session.snapshot_hash_hex != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "session snapshot hash {} does not match {expected}",
                    session.snapshot_hash_hex
                ),
            ));
        }
        Ok(session)
    }

    /// Removes a finished session. A file that is already gone is not an error.
    pub fn clear(path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
