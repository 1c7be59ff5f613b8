use std::time::Duration;

use ladder_app::app_loop::{AppMode, AppState};
use ladder_app::command::Command;
use ladder_core::questions::{PlaceholderSource, QuestionSource, QuestionsRequest, sample_questions};
use ladder_core::replay::replay_to_end;
use ladder_core::{Action, Game, InputJournal, RunOutcome};

fn started(seed: u64) -> (Game, AppState) {
    let mut game = Game::new(seed);
    let mut app = AppState::new();
    app.start(&mut game, sample_questions());
    assert_eq!(app.mode, AppMode::Answering);
    (game, app)
}

#[test]
fn test_answer_cycle_moves_through_modes() {
    let (mut game, mut app) = started(12345);

    app.step(&mut game, Duration::ZERO, Command::Select(3));
    assert_eq!(app.mode, AppMode::Answering);
    app.step(&mut game, Duration::ZERO, Command::LockIn);
    assert_eq!(app.mode, AppMode::Revealed { correct: true });
    app.step(&mut game, Duration::ZERO, Command::Next);
    assert_eq!(app.mode, AppMode::Answering);
    assert_eq!(game.state().level, 2);

    app.step(&mut game, Duration::ZERO, Command::Select(0));
    app.step(&mut game, Duration::ZERO, Command::LockIn);
    assert_eq!(app.mode, AppMode::Finished(RunOutcome::Lost));
}

#[test]
fn test_slow_answer_times_out_before_the_command_lands() {
    let (mut game, mut app) = started(1);

    app.step(&mut game, Duration::from_secs(45), Command::Select(3));
    assert_eq!(app.mode, AppMode::Finished(RunOutcome::Lost));
    assert_eq!(game.state().remaining_time, 0);
    assert_eq!(game.state().locked_choice, None, "selection arrived after the buzzer");

    let ticks = app.accepted_inputs.iter().filter(|action| **action == Action::Tick).count();
    assert_eq!(ticks, 30);
    assert_eq!(app.accepted_inputs.last(), Some(&Action::TimeUp));
}

#[test]
fn test_clock_stops_once_answered() {
    let (mut game, mut app) = started(1);
    app.step(&mut game, Duration::ZERO, Command::Select(3));
    app.step(&mut game, Duration::ZERO, Command::LockIn);

    app.step(&mut game, Duration::from_secs(120), Command::Refresh);
    assert!(app.accepted_inputs.is_empty());
    assert_eq!(app.mode, AppMode::Revealed { correct: true });
}

#[test]
fn test_reset_reloads_the_same_question_set() {
    let (mut game, mut app) = started(9);
    app.step(&mut game, Duration::ZERO, Command::FiftyFifty);
    app.step(&mut game, Duration::ZERO, Command::Reset);

    assert_eq!(app.mode, AppMode::Answering);
    assert!(!game.state().used_lifelines.fifty_fifty);
    assert_eq!(game.state().questions, sample_questions());
    assert!(matches!(app.accepted_inputs.as_slice(), [Action::Reset, Action::Load { .. }]));
}

fn record(app: &AppState, journal: &mut InputJournal) {
    for action in &app.accepted_inputs {
        let seq = journal.inputs.len() as u64;
        journal.append(action.clone(), seq);
    }
}

#[test]
fn test_recorded_inputs_replay_to_the_same_hash() {
    let questions = PlaceholderSource
        .fetch(&QuestionsRequest { categories: Vec::new(), count: 15 })
        .expect("placeholder set");
    let mut game = Game::new(4242);
    let mut app = AppState::new();
    let mut journal = InputJournal::new(4242);

    app.start(&mut game, questions);
    record(&app, &mut journal);
    let commands = [
        Command::Poll,
        Command::FiftyFifty,
        Command::Select(0),
        Command::LockIn,
        Command::Next,
        Command::Switch,
        Command::Select(0),
        Command::LockIn,
        Command::Next,
        Command::WalkAway,
    ];
    for command in commands {
        app.step(&mut game, Duration::from_millis(1_700), command);
        record(&app, &mut journal);
    }
    assert_eq!(app.mode, AppMode::Finished(RunOutcome::WalkedAway));

    let replay = replay_to_end(&journal).expect("replay");
    assert_eq!(replay.final_snapshot_hash, game.snapshot_hash());
    assert_eq!(replay.ignored_inputs, 0);
    assert_eq!(replay.results.winnings, 200);
}
