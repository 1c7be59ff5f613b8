use serde::{Deserialize, Serialize};

use crate::types::Action;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every accepted action of one session, replayable from the seed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub action: Action,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            seed,
            inputs: Vec::new(),
        }
    }

    pub fn append(&mut self, action: Action, seq: u64) {
        self.inputs.push(InputRecord { seq, action });
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.inputs.iter().map(|record| &record.action)
    }
}
