use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::prize::time_budget;
use crate::types::*;

/// One in-progress game. Serializes to the snapshot a persistence adapter stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub level: u8,
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    pub seen_question_ids: BTreeSet<String>,
    pub eliminated_choices: BTreeSet<u8>,
    pub locked_choice: Option<u8>,
    pub answered: bool,
    pub correct: Option<bool>,
    /// Audience percentages per choice; eliminated choices hold 0.
    pub poll_results: Option<[i32; 4]>,
    pub remaining_time: u32,
    #[serde(default)]
    pub info_message: Option<String>,
    pub winnings: u32,
    pub last_safe_level: u8,
    pub game_over: bool,
    pub used_lifelines: LifelineUsage,
}

impl GameState {
    pub fn initial() -> Self {
        Self {
            level: 1,
            questions: Vec::new(),
            current_question_index: 0,
            seen_question_ids: BTreeSet::new(),
            eliminated_choices: BTreeSet::new(),
            locked_choice: None,
            answered: false,
            correct: None,
            poll_results: None,
            remaining_time: time_budget(1),
            info_message: None,
            winnings: 0,
            last_safe_level: 0,
            game_over: false,
            used_lifelines: LifelineUsage::default(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.questions.is_empty()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// The current card is live: loaded, not yet answered, game still running.
    pub fn awaiting_answer(&self) -> bool {
        !self.answered && !self.game_over && self.current_question().is_some()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        if !self.game_over {
            return None;
        }
        Some(match self.correct {
            Some(true) => RunOutcome::Won,
            Some(false) => RunOutcome::Lost,
            None => RunOutcome::WalkedAway,
        })
    }

    pub fn results(&self) -> ResultsSummary {
        ResultsSummary {
            winnings: self.winnings,
            level: self.level,
            last_safe_level: self.last_safe_level,
        }
    }

    /// Clears per-question fields before a new card is shown.
    pub(crate) fn clear_question_scratch(&mut self) {
        self.eliminated_choices.clear();
        self.locked_choice = None;
        self.answered = false;
        self.correct = None;
        self.poll_results = None;
        self.info_message = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
