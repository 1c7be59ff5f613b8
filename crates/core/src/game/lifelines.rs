//! Fifty-fifty, audience poll, and switch-question lifelines.
//! Each lifeline flips its usage flag exactly once per game.

use super::*;
use crate::prize::difficulty_for_level;
use crate::rng::pick_index;

fn lifeline_available(state: &GameState, lifeline: Lifeline) -> bool {
    !state.used_lifelines.is_used(lifeline) && state.awaiting_answer()
}

fn current_correct_index(state: &GameState) -> Option<u8> {
    state
        .current_question()
        .map(|question| question.correct_index)
        .filter(|index| *index < CHOICE_COUNT)
}

/// Hides two wrong choices. With three wrong choices one is spared at random.
pub(super) fn fifty_fifty(mut state: GameState, rng: &mut dyn RandomSource) -> GameState {
    if !lifeline_available(&state, Lifeline::FiftyFifty) {
        return state;
    }
    let Some(correct) = current_correct_index(&state) else {
        return state;
    };

    let mut wrong: Vec<u8> = (0..CHOICE_COUNT).filter(|index| *index != correct).collect();
    while wrong.len() > 2 {
        let spared = pick_index(rng, wrong.len());
        wrong.remove(spared);
    }

    state.eliminated_choices = wrong.into_iter().collect();
    state.used_lifelines.mark_used(Lifeline::FiftyFifty);
    state
}

/// Share of the audience that backs the correct answer at `level`.
pub(crate) fn audience_confidence(level: u8) -> f64 {
    (0.8 - f64::from(level) * 0.025).max(0.4)
}

/// Splits 100 points over the choices still on the board, favouring the answer.
/// Rounding drift is settled on the last available choice, which can leave it
/// negative when every other share rounds up.
pub(super) fn audience_poll(mut state: GameState, rng: &mut dyn RandomSource) -> GameState {
    if !lifeline_available(&state, Lifeline::AudiencePoll) {
        return state;
    }
    let Some(correct) = current_correct_index(&state) else {
        return state;
    };

    let available: Vec<u8> =
        (0..CHOICE_COUNT).filter(|index| !state.eliminated_choices.contains(index)).collect();
    let has_correct = available.contains(&correct);
    let correct_weight = if has_correct { audience_confidence(state.level) } else { 0.0 };
    let spread = (1.0 - correct_weight).max(0.0);

    let others: Vec<u8> = available.iter().copied().filter(|index| *index != correct).collect();
    let draws: Vec<f64> = others.iter().map(|_| rng.next_unit()).collect();
    let draw_total: f64 = draws.iter().sum();
    let draw_total = if draw_total > 0.0 { draw_total } else { 1.0 };

    let mut weights = [0.0_f64; CHOICE_COUNT as usize];
    if has_correct {
        weights[usize::from(correct)] = correct_weight;
    }
    for (index, draw) in others.iter().zip(&draws) {
        weights[usize::from(*index)] = draw / draw_total * spread;
    }

    let mut percentages = weights.map(|weight| (weight * 100.0).round() as i32);
    let total: i32 = percentages.iter().sum();
    if total != 100 {
        // Rounding drift lands on the last choice still on the board.
        let adjust = available.last().copied().unwrap_or(CHOICE_COUNT - 1);
        percentages[usize::from(adjust)] += 100 - total;
    }

    state.poll_results = Some(percentages);
    state.used_lifelines.mark_used(Lifeline::AudiencePoll);
    state
}

/// Replaces the current card, preferring unseen questions of the level's difficulty.
/// The lifeline is spent even when nothing qualifies.
pub(super) fn switch_question(mut state: GameState) -> GameState {
    if !lifeline_available(&state, Lifeline::SwitchQuestion) {
        return state;
    }
    state.used_lifelines.mark_used(Lifeline::SwitchQuestion);

    let Some(target) = find_replacement(&state) else {
        state.info_message = Some(NO_ALTERNATIVE_MESSAGE.to_string());
        return state;
    };

    state.current_question_index = target;
    state.clear_question_scratch();
    state.remaining_time = time_budget(state.level);
    let id = state.questions[target].id.clone();
    state.seen_question_ids.insert(id);
    state
}

fn find_replacement(state: &GameState) -> Option<usize> {
    let wanted = difficulty_for_level(state.level);
    let current = state.current_question_index;
    let candidates = move || {
        state.questions.iter().enumerate().filter(move |(index, _)| *index != current)
    };
    let unseen = |question: &Question| !state.seen_question_ids.contains(&question.id);

    candidates()
        .find(|&(_, question)| unseen(question) && question.difficulty == wanted)
        .or_else(|| candidates().find(|&(_, question)| unseen(question)))
        .or_else(|| candidates().find(|&(_, question)| question.difficulty == wanted))
        .map(|(index, _)| index)
}
