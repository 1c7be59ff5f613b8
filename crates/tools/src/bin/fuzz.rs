use anyhow::{Result, ensure};
use clap::Parser;
use ladder_core::prize::{CHECKPOINTS, MAX_LEVEL};
use ladder_core::questions::{PlaceholderSource, QuestionSource, QuestionsRequest};
use ladder_core::{Action, Game, GameState, Question, RunOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    games: u32,
    /// Upper bound on actions per game
    #[arg(long, default_value_t = 400)]
    steps: u32,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Default)]
struct FuzzReport {
    seed: u64,
    games: u32,
    actions: u64,
    accepted: u64,
    wins: u32,
    losses: u32,
    walk_aways: u32,
    unfinished: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

/// Biased towards answering so games usually reach a terminal state.
fn random_action(rng: &mut ChaCha8Rng, state: &GameState) -> Action {
    let guess = state
        .current_question()
        .map_or(0, |question| if rng.next_u64() % 4 == 0 { 1 } else { question.correct_index });
    choose(
        rng,
        &[
            Action::SelectChoice { index: guess },
            Action::SelectChoice { index: guess },
            Action::LockIn,
            Action::LockIn,
            Action::Next,
            Action::Next,
            Action::UseFiftyFifty,
            Action::UseAudiencePoll,
            Action::UseSwitchQuestion,
            Action::Tick,
            Action::Tick,
            Action::TimeUp,
            Action::WalkAway,
        ],
    )
}

fn check_invariants(before: &GameState, after: &GameState, action: &Action) -> Result<()> {
    ensure!((1..=MAX_LEVEL).contains(&after.level), "level {} out of range", after.level);
    ensure!(
        after.last_safe_level == 0 || CHECKPOINTS.contains(&after.last_safe_level),
        "last safe level {} is not a checkpoint",
        after.last_safe_level
    );
    ensure!(after.last_safe_level >= before.last_safe_level, "last safe level went down");
    if before.game_over {
        ensure!(after == before, "terminal state changed after {action:?}");
    } else if !after.game_over {
        ensure!(after.winnings >= before.winnings, "winnings dropped after {action:?}");
    }

    ensure!(after.eliminated_choices.len() <= 2, "more than two choices eliminated");
    if let Some(question) = after.current_question() {
        ensure!(
            !after.eliminated_choices.contains(&question.correct_index),
            "correct choice {} was eliminated",
            question.correct_index
        );
    }
    if matches!(action, Action::UseAudiencePoll)
        && let Some(poll) = after.poll_results
        && before.poll_results.is_none()
    {
        ensure!(poll.iter().sum::<i32>() == 100, "poll {poll:?} does not sum to 100");
        for index in &after.eliminated_choices {
            ensure!(poll[usize::from(*index)] == 0, "poll {poll:?} votes for eliminated {index}");
        }
    }
    Ok(())
}

fn run_game(
    game_seed: u64,
    steps: u32,
    questions: &[Question],
    report: &mut FuzzReport,
) -> Result<()> {
    let mut game = Game::new(game_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(game_seed ^ 0x5EED);
    game.dispatch(Action::Load { questions: questions.to_vec() });

    for _ in 0..steps {
        if game.state().game_over {
            break;
        }
        let action = random_action(&mut rng, game.state());
        let before = game.state().clone();
        report.actions += 1;
        if game.dispatch(action.clone()) {
            report.accepted += 1;
        }
        check_invariants(&before, game.state(), &action)?;
    }

    match game.state().outcome() {
        Some(RunOutcome::Won) => report.wins += 1,
        Some(RunOutcome::Lost) => report.losses += 1,
        Some(RunOutcome::WalkedAway) => report.walk_aways += 1,
        None => report.unfinished += 1,
    }
    Ok(())
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} games...", args.seed, args.games);
    let questions = PlaceholderSource.fetch(&QuestionsRequest::default())?;
    let mut seeds = ChaCha8Rng::seed_from_u64(args.seed);
    let mut report = FuzzReport { seed: args.seed, games: args.games, ..FuzzReport::default() };

    for game_index in 0..args.games {
        let game_seed = seeds.next_u64();
        run_game(game_seed, args.steps, &questions, &mut report)
            .map_err(|e| e.context(format!("game {game_index} (seed {game_seed})")))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} actions ({} accepted): {} won, {} lost, {} walked away, {} unfinished",
            report.actions,
            report.accepted,
            report.wins,
            report.losses,
            report.walk_aways,
            report.unfinished
        );
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
