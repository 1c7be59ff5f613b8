//! Append-only action journal on disk, chained with SHA-256.
//!
//! Layout is line-delimited JSON:
//! - line 1 is the header (`format_version`, `build_id`, `seed`);
//! - every later line is one accepted action with `prev_sha256_hex` and
//!   `sha256_hex`, where each hash covers the record body plus the previous hash.
//!
//! Each append is flushed so an interrupted session loses at most the action
//! being written. Loading stops at the first malformed, truncated, out of
//! sequence, or re-hashed line.

use std::error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{InputJournal, InputRecord, JOURNAL_FORMAT_VERSION};
use crate::types::Action;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct JournalHeader {
    format_version: u16,
    build_id: String,
    seed: u64,
}

/// Canonical hash input for one record.
#[derive(Serialize)]
struct ChainedBody<'a> {
    seq: u64,
    action: &'a Action,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChainedRecord {
    seq: u64,
    action: Action,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash value for the first record of a chain.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn chain_hash(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

fn body_json(seq: u64, action: &Action) -> serde_json::Result<String> {
    serde_json::to_string(&ChainedBody { seq, action })
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates (or truncates) the file and writes the header line.
    pub fn create(path: &Path, seed: u64, build_id: &str) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let header = JournalHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: build_id.to_string(),
            seed,
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: GENESIS_HASH.to_string(), next_seq: 0 })
    }

    /// Continues a chain returned by `load_journal_from_file`.
    pub fn resume(path: &Path, loaded: &LoadedJournal) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_sha256_hex: loaded.last_sha256_hex.clone(),
            next_seq: loaded.next_seq,
        })
    }

    pub fn append(&mut self, action: &Action) -> io::Result<()> {
        let body = body_json(self.next_seq, action).map_err(io::Error::other)?;
        let sha256_hex = chain_hash(&body, &self.last_sha256_hex);

        let record = ChainedRecord {
            seq: self.next_seq,
            action: action.clone(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let line = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(())
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug)]
pub enum JournalLoadError {
    Io(io::Error),
    EmptyFile,
    InvalidHeader { line: usize, message: String },
    InvalidRecord { line: usize, message: String },
    /// The last line has no terminating newline.
    IncompleteLine { line: usize },
    HashChainBroken { line: usize },
}

impl fmt::Display for JournalLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "journal I/O error: {e}"),
            Self::EmptyFile => write!(f, "journal file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid journal header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid journal record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => write!(f, "incomplete journal line at line {line}"),
            Self::HashChainBroken { line } => write!(f, "SHA-256 hash chain broken at line {line}"),
        }
    }
}

impl error::Error for JournalLoadError {}

pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path).map_err(JournalLoadError::Io)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: JournalHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = InputJournal {
        format_version: header.format_version,
        build_id: header.build_id,
        seed: header.seed,
        inputs: Vec::with_capacity(lines.len() - 1),
    };

    let mut prev_sha256_hex = GENESIS_HASH.to_string();
    let mut next_seq = 0_u64;

    for (offset, line) in lines.iter().enumerate().skip(1) {
        let line_number = offset + 1;
        let invalid =
            |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let record: ChainedRecord = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != next_seq {
            return Err(invalid(format!("expected seq {next_seq}, found {}", record.seq)));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        let body = body_json(record.seq, &record.action).map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != chain_hash(&body, &prev_sha256_hex) {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.inputs.push(InputRecord { seq: record.seq, action: record.action });
        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex, next_seq })
}

#[cfg(test)]
mod tests;
