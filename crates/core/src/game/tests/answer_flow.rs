//! Lock-in, advance, and game-ending flows across the prize ladder.

use super::support::*;

#[test]
fn correct_lock_in_banks_prize_without_advancing_level() {
    let state = loaded(questions(2, Difficulty::Easy));
    let state = apply_all(state, &[Action::SelectChoice { index: 1 }, Action::LockIn]);

    assert!(state.answered);
    assert_eq!(state.correct, Some(true));
    assert_eq!(state.winnings, 100);
    assert_eq!(state.level, 1, "level only moves on Next");
    assert!(!state.game_over);
}

#[test]
fn next_after_correct_answer_moves_to_following_card() {
    let state = answer_correctly(loaded(questions(2, Difficulty::Easy)));
    let state = apply(state, Action::Next);

    assert_eq!(state.level, 2);
    assert_eq!(state.current_question_index, 1);
    assert!(!state.answered);
    assert_eq!(state.correct, None);
    assert_eq!(state.locked_choice, None);
    assert_eq!(state.remaining_time, time_budget(2));
    assert!(state.seen_question_ids.contains("easy-1"));
    assert!(state.seen_question_ids.contains("easy-2"));
}

#[test]
fn time_up_before_any_checkpoint_pays_nothing() {
    let state = apply(loaded(questions(1, Difficulty::Easy)), Action::TimeUp);

    assert!(state.game_over);
    assert!(state.answered);
    assert_eq!(state.correct, Some(false));
    assert_eq!(state.winnings, 0);
    assert_eq!(state.outcome(), Some(RunOutcome::Lost));
}

#[test]
fn wrong_answer_after_first_checkpoint_pays_checkpoint_prize() {
    let state = climb(loaded(questions(10, Difficulty::Easy)), 5);
    assert_eq!(state.level, 6);
    assert_eq!(state.last_safe_level, 5);

    let state = answer_wrongly(state);
    assert!(state.game_over);
    assert_eq!(state.correct, Some(false));
    assert_eq!(state.winnings, prize_for_level(5));
    assert_eq!(state.winnings, 1_000);
}

#[test]
fn wrong_answer_drops_banked_amount_to_checkpoint() {
    let state = climb(loaded(questions(10, Difficulty::Easy)), 6);
    assert_eq!(state.level, 7);
    assert_eq!(state.winnings, 2_000);

    let state = answer_wrongly(state);
    assert_eq!(state.winnings, 1_000);
}

#[test]
fn clearing_all_fifteen_rungs_wins_the_top_prize() {
    let state = climb(loaded(ladder_questions()), 14);
    assert_eq!(state.level, 15);
    assert_eq!(state.last_safe_level, 10);

    let state = answer_correctly(state);
    assert_eq!(state.winnings, 1_000_000);
    assert!(!state.game_over, "the win is declared on Next");

    let state = apply(state, Action::Next);
    assert!(state.game_over);
    assert!(state.answered);
    assert_eq!(state.correct, Some(true));
    assert_eq!(state.level, 15);
    assert_eq!(state.winnings, 1_000_000);
    assert_eq!(state.outcome(), Some(RunOutcome::Won));
}

#[test]
fn checkpoints_are_recorded_in_order() {
    let mut state = loaded(ladder_questions());
    let mut safe_levels = Vec::new();
    for _ in 0..12 {
        state = climb(state, 1);
        safe_levels.push(state.last_safe_level);
    }
    assert!(safe_levels.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(safe_levels[3], 0);
    assert_eq!(safe_levels[4], 5);
    assert_eq!(safe_levels[9], 10);
}

#[test]
fn walk_away_keeps_last_banked_amount() {
    let state = climb(loaded(questions(10, Difficulty::Easy)), 6);
    assert_eq!(state.winnings, 2_000);

    let state = apply(state, Action::WalkAway);
    assert!(state.game_over);
    assert!(state.answered);
    assert_eq!(state.winnings, 2_000, "walking away does not snap to the checkpoint");
    assert_eq!(state.outcome(), Some(RunOutcome::WalkedAway));
}

#[test]
fn walk_away_on_first_card_leaves_with_nothing() {
    let state = apply(loaded(questions(3, Difficulty::Easy)), Action::WalkAway);
    assert!(state.game_over);
    assert_eq!(state.winnings, 0);
}

#[test]
fn exhausted_question_list_holds_index_and_level() {
    let state = answer_correctly(loaded(questions(1, Difficulty::Easy)));
    let state = apply(state, Action::Next);

    assert_eq!(state.current_question_index, 0);
    assert_eq!(state.level, 1);
    assert!(!state.answered);
    assert_eq!(state.remaining_time, time_budget(1));
}

#[test]
fn countdown_resets_to_level_budget_on_next() {
    let state = climb(loaded(questions(7, Difficulty::Easy)), 5);
    assert_eq!(state.level, 6);
    assert_eq!(state.remaining_time, 45);
}

#[test]
fn tick_counts_down_and_stops_at_zero() {
    let mut state = loaded(questions(1, Difficulty::Easy));
    for _ in 0..29 {
        state = apply(state, Action::Tick);
    }
    assert_eq!(state.remaining_time, 1);

    state = apply_all(state, &[Action::Tick, Action::Tick, Action::Tick]);
    assert_eq!(state.remaining_time, 0);
}

#[test]
fn tick_is_ignored_once_answered() {
    let state = answer_correctly(loaded(questions(2, Difficulty::Easy)));
    let before = state.remaining_time;
    let state = apply(state, Action::Tick);
    assert_eq!(state.remaining_time, before);
}

#[test]
fn selection_can_change_before_lock_in() {
    let state = loaded(questions(1, Difficulty::Easy));
    let state = apply_all(
        state,
        &[
            Action::SelectChoice { index: 0 },
            Action::SelectChoice { index: 3 },
            Action::SelectChoice { index: 1 },
        ],
    );
    assert_eq!(state.locked_choice, Some(1));
    assert!(!state.answered);

    let state = apply(state, Action::LockIn);
    assert_eq!(state.correct, Some(true));
}
