use std::time::Duration;

use ladder_core::{Action, Game, GameState, Question, RunOutcome};

use crate::command::Command;

const MILLIS_PER_TICK: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// No question set installed yet.
    #[default]
    Loading,
    Answering,
    /// The answer was checked; waiting for `next`.
    Revealed { correct: bool },
    Finished(RunOutcome),
    Quit,
}

impl AppMode {
    pub fn from_state(state: &GameState) -> Self {
        if let Some(outcome) = state.outcome() {
            return Self::Finished(outcome);
        }
        if state.answered {
            return Self::Revealed { correct: state.correct == Some(true) };
        }
        if state.current_question().is_some() { Self::Answering } else { Self::Loading }
    }
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Actions accepted during the current `step()` call.
    /// Drained by the caller after each step to persist to the journal file.
    pub accepted_inputs: Vec<Action>,
    question_set: Vec<Question>,
    /// Wall-clock time not yet converted into whole ticks.
    pending_clock_ms: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the question set. `Reset` reloads the same set.
    pub fn start(&mut self, game: &mut Game, questions: Vec<Question>) {
        self.accepted_inputs.clear();
        self.question_set = questions;
        self.apply_and_record(game, Action::Load { questions: self.question_set.clone() });
        self.mode = AppMode::from_state(game.state());
    }

    /// Restores a saved snapshot. The hydrate is recorded so a journal that
    /// starts mid-game still replays.
    pub fn resume(&mut self, game: &mut Game, snapshot: GameState, questions: Vec<Question>) {
        self.accepted_inputs.clear();
        self.question_set = questions;
        self.apply_and_record(game, Action::Hydrate { snapshot: Box::new(snapshot) });
        self.mode = AppMode::from_state(game.state());
    }

    /// Runs the clock for `elapsed`, then applies `command`.
    pub fn step(&mut self, game: &mut Game, elapsed: Duration, command: Command) {
        self.accepted_inputs.clear();
        self.advance_clock(game, elapsed);

        match command {
            Command::Quit => {
                self.mode = AppMode::Quit;
                return;
            }
            Command::Reset => {
                self.apply_and_record(game, Action::Reset);
                let questions = self.question_set.clone();
                self.apply_and_record(game, Action::Load { questions });
            }
            other => {
                if let Some(action) = other.action() {
                    self.apply_and_record(game, action);
                }
            }
        }
        self.mode = AppMode::from_state(game.state());
    }

    /// Converts elapsed time into `Tick`s, and `TimeUp` once the countdown is empty.
    pub fn advance_clock(&mut self, game: &mut Game, elapsed: Duration) {
        if !game.state().awaiting_answer() {
            self.pending_clock_ms = 0;
            return;
        }
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.pending_clock_ms = self.pending_clock_ms.saturating_add(elapsed_ms);

        while self.pending_clock_ms >= MILLIS_PER_TICK && game.state().remaining_time > 0 {
            self.pending_clock_ms -= MILLIS_PER_TICK;
            self.apply_and_record(game, Action::Tick);
        }
        if game.state().remaining_time == 0 && game.state().awaiting_answer() {
            log::info!("countdown expired at level {}", game.state().level);
            self.apply_and_record(game, Action::TimeUp);
            self.pending_clock_ms = 0;
        }
        self.mode = AppMode::from_state(game.state());
    }

    fn apply_and_record(&mut self, game: &mut Game, action: Action) {
        if game.dispatch(action.clone()) {
            self.accepted_inputs.push(action);
        }
    }
}
