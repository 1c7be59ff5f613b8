//! Shared fixtures for the `game` test suites.

use super::*;
use crate::prize::difficulty_for_level;
use crate::rng::FixedSequence;

pub(super) fn question(id: &str, difficulty: Difficulty, correct_index: u8) -> Question {
    Question {
        id: id.to_string(),
        category: "test".to_string(),
        difficulty,
        prompt: format!("Prompt for {id}"),
        choices: ["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        correct_index,
    }
}

/// `count` questions of one difficulty, all answered by choice 1.
pub(super) fn questions(count: usize, difficulty: Difficulty) -> Vec<Question> {
    (0..count)
        .map(|index| question(&format!("{}-{}", difficulty.as_str(), index + 1), difficulty, 1))
        .collect()
}

/// A full fifteen-rung set following the difficulty bands, answered by choice 2.
pub(super) fn ladder_questions() -> Vec<Question> {
    (1..=15_u8)
        .map(|level| {
            let difficulty = difficulty_for_level(level);
            question(&format!("rung-{level}"), difficulty, 2)
        })
        .collect()
}

pub(super) fn apply(state: GameState, action: Action) -> GameState {
    let mut rng = FixedSequence::new(vec![0.5]);
    reduce(state, &action, &mut rng)
}

pub(super) fn apply_all(mut state: GameState, actions: &[Action]) -> GameState {
    for action in actions {
        state = apply(state, action.clone());
    }
    state
}

pub(super) fn loaded(questions: Vec<Question>) -> GameState {
    apply(GameState::initial(), Action::Load { questions })
}

/// Selects the right answer on the current card and locks it in.
pub(super) fn answer_correctly(state: GameState) -> GameState {
    let correct = state.current_question().map_or(0, |question| question.correct_index);
    apply_all(state, &[Action::SelectChoice { index: correct }, Action::LockIn])
}

pub(super) fn answer_wrongly(state: GameState) -> GameState {
    let correct = state.current_question().map_or(0, |question| question.correct_index);
    let wrong = (correct + 1) % CHOICE_COUNT;
    apply_all(state, &[Action::SelectChoice { index: wrong }, Action::LockIn])
}

/// Runs `count` correct lock-in/next cycles.
pub(super) fn climb(mut state: GameState, count: usize) -> GameState {
    for _ in 0..count {
        state = apply(answer_correctly(state), Action::Next);
    }
    state
}
