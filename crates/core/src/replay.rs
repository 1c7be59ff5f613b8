//! Headless re-execution of a recorded session.
//!
//! A journal holds the seed plus every accepted action, so feeding the actions
//! back through a fresh `Game` reproduces the same states, lifeline draws
//! included.

use std::error;
use std::fmt;

use crate::{
    ResultsSummary, RunOutcome,
    game::Game,
    journal::{InputJournal, JOURNAL_FORMAT_VERSION},
};

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    UnsupportedFormatVersion(u16),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormatVersion(version) => {
                write!(f, "unsupported journal format version {version}")
            }
        }
    }
}

impl error::Error for ReplayError {}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    /// `None` when the journal stops mid-game.
    pub final_outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub applied_inputs: u64,
    /// Recorded actions that no longer change the state. Non-zero means the
    /// journal and the current rules disagree.
    pub ignored_inputs: u64,
    pub results: ResultsSummary,
}

/// Rebuilds the live `Game` a journal describes.
pub fn replay_journal_inputs(journal: &InputJournal) -> Result<Game, ReplayError> {
    Ok(run_journal(journal)?.0)
}

pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let (game, ignored_inputs) = run_journal(journal)?;
    let state = game.state();
    Ok(ReplayResult {
        final_outcome: state.outcome(),
        final_snapshot_hash: game.snapshot_hash(),
        applied_inputs: game.accepted_inputs(),
        ignored_inputs,
        results: state.results(),
    })
}

fn run_journal(journal: &InputJournal) -> Result<(Game, u64), ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormatVersion(journal.format_version));
    }

    let mut game = Game::new(journal.seed);
    let mut ignored = 0_u64;
    for record in &journal.inputs {
        if !game.dispatch(record.action.clone()) {
            log::warn!("replay: {} at seq {} changed nothing", record.action.name(), record.seq);
            ignored += 1;
        }
    }
    log::debug!(
        "replayed {} of {} inputs for seed {}",
        game.accepted_inputs(),
        journal.inputs.len(),
        journal.seed
    );
    Ok((game, ignored))
}
