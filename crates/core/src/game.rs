//! The game state machine.
//!
//! `reduce` is the pure `(state, action) -> state` transition function. Every
//! precondition violation degrades to returning the state unchanged; the only
//! soft signal is `info_message` when a switch finds no alternative.
//!
//! `Game` wraps `reduce` with a seeded random source, an event trail, and an
//! input counter so a front end can drive one session from a single owner.

use std::mem;

use crate::prize::time_budget;
use crate::rng::{RandomSource, SeededRandom};
use crate::state::GameState;
use crate::types::*;

mod answer;
mod hash;
mod lifelines;

pub use hash::state_hash;

#[cfg(test)]
mod test_support;

pub const NO_ALTERNATIVE_MESSAGE: &str = "No alternative question available at this level.";

pub fn reduce(state: GameState, action: &Action, rng: &mut dyn RandomSource) -> GameState {
    match action {
        Action::Load { questions } => load(state, questions),
        Action::Hydrate { snapshot } => hydrate(snapshot),
        Action::SelectChoice { index } => answer::select_choice(state, *index),
        Action::LockIn => answer::lock_in(state),
        Action::Next => answer::next(state),
        Action::UseFiftyFifty => lifelines::fifty_fifty(state, rng),
        Action::UseAudiencePoll => lifelines::audience_poll(state, rng),
        Action::UseSwitchQuestion => lifelines::switch_question(state),
        Action::Tick => answer::tick(state),
        Action::TimeUp => answer::time_up(state),
        Action::WalkAway => answer::walk_away(state),
        Action::Reset => GameState::initial(),
    }
}

/// Installs a question set on an unloaded state.
///
/// A game already in progress ignores the load so a late duplicate response
/// cannot restart it. An empty set leaves nothing to play and is ignored too.
fn load(state: GameState, questions: &[Question]) -> GameState {
    if state.is_loaded() || questions.is_empty() {
        return state;
    }
    let mut loaded = GameState::initial();
    loaded.questions = questions.to_vec();
    loaded.remaining_time = time_budget(loaded.level);
    loaded.seen_question_ids.insert(questions[0].id.clone());
    loaded
}

fn hydrate(snapshot: &GameState) -> GameState {
    let mut restored = snapshot.clone();
    restored.remaining_time = restored.remaining_time.min(time_budget(restored.level));
    restored
}

pub struct Game {
    seed: u64,
    rng: SeededRandom,
    state: GameState,
    log: Vec<LogEvent>,
    next_input_seq: u64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SeededRandom::new(seed),
            state: GameState::initial(),
            log: Vec::new(),
            next_input_seq: 0,
        }
    }

    /// Starts from a persisted snapshot.
    pub fn resume(seed: u64, snapshot: GameState) -> Self {
        let mut game = Self::new(seed);
        game.dispatch(Action::Hydrate { snapshot: Box::new(snapshot) });
        game
    }

    /// Applies one action. Returns `false` when the action was a no-op.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(self.state.clone(), &action, &mut self.rng);
        if next == self.state {
            log::trace!("{} ignored at level {}", action.name(), self.state.level);
            return false;
        }

        log::debug!("{} accepted at level {}", action.name(), self.state.level);
        let previous = mem::replace(&mut self.state, next);
        self.record_events(&action, &previous);
        self.next_input_seq += 1;
        true
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Number of actions that changed the state so far.
    pub fn accepted_inputs(&self) -> u64 {
        self.next_input_seq
    }

    fn record_events(&mut self, action: &Action, previous: &GameState) {
        let state = &self.state;
        match action {
            Action::Load { .. } => {
                self.log.push(LogEvent::QuestionsLoaded { count: state.questions.len() });
            }
            Action::Hydrate { .. } => self.log.push(LogEvent::Hydrated { level: state.level }),
            Action::LockIn => {
                if let (Some(choice), Some(correct)) = (state.locked_choice, state.correct) {
                    self.log.push(LogEvent::AnswerLocked { level: state.level, choice, correct });
                }
                if state.last_safe_level > previous.last_safe_level {
                    self.log.push(LogEvent::CheckpointReached { level: state.last_safe_level });
                }
            }
            Action::Next => {
                if let Some(question) = state.current_question()
                    && !state.game_over
                {
                    self.log.push(LogEvent::Advanced {
                        level: state.level,
                        question_id: question.id.clone(),
                    });
                }
            }
            Action::UseFiftyFifty => {
                self.log.push(LogEvent::LifelineUsed { lifeline: Lifeline::FiftyFifty });
            }
            Action::UseAudiencePoll => {
                self.log.push(LogEvent::LifelineUsed { lifeline: Lifeline::AudiencePoll });
            }
            Action::UseSwitchQuestion => {
                self.log.push(LogEvent::LifelineUsed { lifeline: Lifeline::SwitchQuestion });
                if state.current_question_index == previous.current_question_index {
                    log::warn!(
                        "switch lifeline consumed with no alternative at level {}",
                        state.level
                    );
                    self.log.push(LogEvent::SwitchUnavailable);
                }
            }
            Action::TimeUp => self.log.push(LogEvent::TimeExpired { level: state.level }),
            Action::WalkAway => {
                self.log.push(LogEvent::WalkedAway { winnings: state.winnings });
            }
            Action::Reset => self.log.push(LogEvent::Reset),
            Action::SelectChoice { .. } | Action::Tick => {}
        }

        if !previous.game_over
            && !matches!(action, Action::Hydrate { .. })
            && let Some(outcome) = state.outcome()
        {
            log::info!(
                "game over: {outcome:?} at level {} with ${}",
                state.level,
                state.winnings
            );
            self.log.push(LogEvent::GameEnded { outcome, winnings: state.winnings });
        }
    }
}
