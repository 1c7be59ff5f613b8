//! Final results of the last finished game, read back by the results screen.

use directories::ProjectDirs;
use ladder_core::{GameState, ResultsSummary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{APP_NAME, outcome_code, unix_time_ms};

pub const RESULTS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultsFile {
    pub format_version: u32,
    pub seed: u64,
    pub winnings: u32,
    pub level: u8,
    pub last_safe_level: u8,
    /// Outcome code such as `WIN_TOP_PRIZE`.
    pub outcome: String,
    pub updated_at_unix_ms: u64,
}

impl ResultsFile {
    /// `None` while the game is still running.
    pub fn from_final_state(seed: u64, state: &GameState) -> Option<Self> {
        let outcome = state.outcome()?;
        let ResultsSummary { winnings, level, last_safe_level } = state.results();
        Some(Self {
            format_version: RESULTS_FORMAT_VERSION,
            seed,
            winnings,
            level,
            last_safe_level,
            outcome: outcome_code(outcome).to_string(),
            updated_at_unix_ms: unix_time_ms(),
        })
    }

    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary {
            winnings: self.winnings,
            level: self.level,
            last_safe_level: self.last_safe_level,
        }
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_results.json");
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

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let results: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::questions::sample_questions;
    use ladder_core::{Action, Game};
    use tempfile::tempdir;

    #[test]
    fn running_game_has_no_results() {
        let mut game = Game::new(3);
        game.dispatch(Action::Load { questions: sample_questions() });
        assert_eq!(ResultsFile::from_final_state(3, game.state()), None);
    }

    #[test]
    fn results_file_atomic_write_and_load() {
        let mut game = Game::new(3);
        for action in [
            Action::Load { questions: sample_questions() },
            Action::SelectChoice { index: 3 },
            Action::LockIn,
            Action::Next,
            Action::WalkAway,
        ] {
            game.dispatch(action);
        }
        let results = ResultsFile::from_final_state(3, game.state()).expect("finished game");
        assert_eq!(results.outcome, "WALK_AWAY_BANKED");
        assert_eq!(
            results.summary(),
            ResultsSummary { winnings: 100, level: 2, last_safe_level: 0 }
        );

        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("last_results.json");
        results.write_atomic(&path).expect("write");
        let loaded = ResultsFile::load(&path).expect("load");
        assert_eq!(results, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }
}
