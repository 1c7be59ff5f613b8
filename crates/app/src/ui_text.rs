//! Text formatting for the question card, prize ladder, poll, recap, and event log entries.

use ladder_app::app_loop::AppMode;
use ladder_app::command::HELP_TEXT;
use ladder_app::results_file::ResultsFile;
use ladder_app::{format_money, format_seed, format_snapshot_hash, outcome_code};
use ladder_core::prize::{MAX_LEVEL, is_checkpoint, prize_for_level};
use ladder_core::{CHOICE_COUNT, Game, GameState, Lifeline, LogEvent, ResultsSummary};

const CHOICE_LABELS: [char; CHOICE_COUNT as usize] = ['A', 'B', 'C', 'D'];
const POLL_BAR_WIDTH: usize = 20;

pub fn status_text(mode: &AppMode) -> String {
    match mode {
        AppMode::Loading => "Loading questions...".to_string(),
        AppMode::Answering => format!("Your answer? ({HELP_TEXT})"),
        AppMode::Revealed { correct: true } => "Correct! Type 'next' to continue.".to_string(),
        AppMode::Revealed { correct: false } => "Wrong answer.".to_string(),
        AppMode::Finished(outcome) => format!("Finished: {}", outcome_code(*outcome)),
        AppMode::Quit => "Session saved. Bye.".to_string(),
    }
}

pub fn question_card_lines(state: &GameState) -> Vec<String> {
    let Some(question) = state.current_question() else {
        return vec!["No question loaded.".to_string()];
    };

    let mut lines = vec![
        format!(
            "Level {}/{} for {}  [{} | {}]  {}s left",
            state.level,
            MAX_LEVEL,
            format_money(prize_for_level(state.level)),
            question.category,
            question.difficulty.as_str(),
            state.remaining_time
        ),
        question.prompt.clone(),
    ];
    for (index, choice) in question.choices.iter().enumerate() {
        let index = index as u8;
        if state.eliminated_choices.contains(&index) {
            continue;
        }
        let marker = if state.locked_choice == Some(index) { '>' } else { ' ' };
        lines.push(format!("{marker} {}: {choice}", CHOICE_LABELS[usize::from(index)]));
    }
    if let Some(poll) = state.poll_results {
        lines.extend(poll_lines(&poll, state));
    }
    if let Some(message) = &state.info_message {
        lines.push(message.clone());
    }
    lines.push(lifeline_line(state));
    lines
}

pub fn poll_lines(poll: &[i32; 4], state: &GameState) -> Vec<String> {
    let mut lines = vec!["Audience poll:".to_string()];
    for (index, percentage) in poll.iter().enumerate() {
        if state.eliminated_choices.contains(&(index as u8)) {
            continue;
        }
        let filled = usize::try_from(*percentage).unwrap_or(0) * POLL_BAR_WIDTH / 100;
        lines.push(format!(
            "  {} {:<width$} {percentage:>3}%",
            CHOICE_LABELS[index],
            "#".repeat(filled),
            width = POLL_BAR_WIDTH
        ));
    }
    lines
}

fn lifeline_line(state: &GameState) -> String {
    let mark = |lifeline: Lifeline, label: &str| {
        if state.used_lifelines.is_used(lifeline) {
            format!("({label})")
        } else {
            label.to_string()
        }
    };
    format!(
        "Lifelines: {} {} {}",
        mark(Lifeline::FiftyFifty, "50:50"),
        mark(Lifeline::AudiencePoll, "poll"),
        mark(Lifeline::SwitchQuestion, "switch")
    )
}

/// Top rung first. `>` marks the current level, `*` the checkpoints.
pub fn ladder_lines(state: &GameState) -> Vec<String> {
    (1..=MAX_LEVEL)
        .rev()
        .map(|level| {
            let current = if level == state.level { '>' } else { ' ' };
            let checkpoint = if is_checkpoint(level) { '*' } else { ' ' };
            format!("{current}{level:>3} {checkpoint} {}", format_money(prize_for_level(level)))
        })
        .collect()
}

pub fn finished_recap_lines(game: &Game) -> Vec<String> {
    let state = game.state();
    let reason = state.outcome().map_or("RUNNING", outcome_code);
    vec![
        "Game recap:".to_string(),
        format!("Reason: {reason}"),
        format!("Winnings: {}", format_money(state.winnings)),
        format!("Level: {}", state.level),
        format!("Safe level: {}", state.last_safe_level),
        format!("Seed: {}", game.seed()),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
    ]
}

/// Recap of a saved game, read back from `last_results.json`.
pub fn last_results_lines(results: &ResultsFile) -> Vec<String> {
    let ResultsSummary { winnings, level, last_safe_level } = results.summary();
    vec![
        "Last game:".to_string(),
        format!("Reason: {}", results.outcome),
        format!("Winnings: {}", format_money(winnings)),
        format!("Level: {level}"),
        format!("Safe level: {last_safe_level}"),
        format!("Seed: {}", format_seed(results.seed)),
    ]
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::QuestionsLoaded { count } => format!("{count} questions loaded"),
        LogEvent::Hydrated { level } => format!("resumed at level {level}"),
        LogEvent::AnswerLocked { level, choice, correct } => format!(
            "level {level}: locked {} ({})",
            CHOICE_LABELS.get(usize::from(*choice)).copied().unwrap_or('?'),
            if *correct { "correct" } else { "wrong" }
        ),
        LogEvent::CheckpointReached { level } => {
            format!("checkpoint {level} secured: {}", format_money(prize_for_level(*level)))
        }
        LogEvent::Advanced { level, question_id } => {
            format!("level {level}: question {question_id}")
        }
        LogEvent::LifelineUsed { lifeline } => format!("lifeline used: {lifeline:?}"),
        LogEvent::SwitchUnavailable => "no alternative question to switch to".to_string(),
        LogEvent::TimeExpired { level } => format!("time ran out at level {level}"),
        LogEvent::WalkedAway { winnings } => {
            format!("walked away with {}", format_money(*winnings))
        }
        LogEvent::GameEnded { outcome, winnings } => {
            format!("game over: {} {}", outcome_code(*outcome), format_money(*winnings))
        }
        LogEvent::Reset => "game reset".to_string(),
    }
}
