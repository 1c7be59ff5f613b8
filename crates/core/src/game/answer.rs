//! Answer cycle: select, lock in, advance, countdown, and the ways a game ends.

use super::*;
use crate::prize::{MAX_LEVEL, is_checkpoint, prize_for_level};

pub(super) fn select_choice(mut state: GameState, index: u8) -> GameState {
    if !state.awaiting_answer() || index >= CHOICE_COUNT {
        return state;
    }
    state.locked_choice = Some(index);
    state
}

pub(super) fn lock_in(mut state: GameState) -> GameState {
    if !state.awaiting_answer() {
        return state;
    }
    let Some(choice) = state.locked_choice else {
        return state;
    };
    let Some(question) = state.current_question() else {
        return state;
    };

    let is_correct = choice == question.correct_index;
    state.answered = true;
    state.correct = Some(is_correct);
    if is_correct {
        state.winnings = prize_for_level(state.level);
        if is_checkpoint(state.level) {
            state.last_safe_level = state.level;
        }
    } else {
        end_at_safe_prize(&mut state);
    }
    state
}

pub(super) fn next(mut state: GameState) -> GameState {
    if !state.answered || state.game_over || state.current_question().is_none() {
        return state;
    }

    let was_correct = state.correct == Some(true);
    if was_correct && state.level >= MAX_LEVEL {
        // Top prize was already banked by the lock-in.
        state.game_over = true;
        return state;
    }

    let next_level = if was_correct { state.level + 1 } else { state.level };
    let next_index = state.current_question_index + 1;
    let exhausted = next_index >= state.questions.len();

    state.current_question_index = next_index.min(state.questions.len() - 1);
    if !exhausted {
        state.level = next_level;
    }
    state.clear_question_scratch();
    state.remaining_time = time_budget(state.level);
    if let Some(id) = state.current_question().map(|question| question.id.clone()) {
        state.seen_question_ids.insert(id);
    }
    state
}

pub(super) fn tick(mut state: GameState) -> GameState {
    if !state.awaiting_answer() {
        return state;
    }
    state.remaining_time = state.remaining_time.saturating_sub(1);
    state
}

pub(super) fn time_up(mut state: GameState) -> GameState {
    if !state.awaiting_answer() {
        return state;
    }
    state.answered = true;
    state.correct = Some(false);
    end_at_safe_prize(&mut state);
    state
}

/// Leaves with the amount banked at the last correct lock-in, not the checkpoint prize.
pub(super) fn walk_away(mut state: GameState) -> GameState {
    if !state.awaiting_answer() {
        return state;
    }
    state.game_over = true;
    state.answered = true;
    state
}

fn end_at_safe_prize(state: &mut GameState) {
    state.game_over = true;
    state.winnings = prize_for_level(state.last_safe_level);
}
