//! `ladder`: play the fifteen-rung prize ladder in a terminal.
//!
//! Every accepted action is mirrored to the session file (and the optional
//! journal) before the next prompt, so quitting mid-question loses nothing.

mod ui_text;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use ladder_app::app_loop::{AppMode, AppState};
use ladder_app::command::{Command, HELP_TEXT, parse_command};
use ladder_app::results_file::ResultsFile;
use ladder_app::seed::{generate_runtime_seed, resolve_seed};
use ladder_app::session_file::SessionFile;
use ladder_app::settings::{CliOverrides, EnvOverrides, SettingsFile, resolve_questions_request};
use ladder_app::{format_money, format_seed};
use ladder_core::questions::{
    PlaceholderSource, QuestionSource, QuestionsRequest, validate_questions,
};
use ladder_core::{Game, JournalWriter, Question};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::ui_text::{
    event_log_line, finished_recap_lines, ladder_lines, last_results_lines, question_card_lines,
    status_text,
};

#[derive(Parser, Debug)]
#[command(name = "ladder", version, about = "Climb the fifteen-rung prize ladder")]
struct Cli {
    /// Seed for the lifeline draws (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Continue the saved session instead of starting a new game
    #[arg(long)]
    resume: bool,

    /// Record accepted actions to this JSONL journal
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Load the question set from a JSON file instead of generating placeholders
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Number of questions to generate (1-50)
    #[arg(long)]
    count: Option<usize>,

    /// Category to draw from; repeat for several
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Directory for the session and results files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Store the resolved question count and categories in settings.toml
    #[arg(long)]
    save_settings: bool,

    /// Print the results of the last finished game and exit
    #[arg(long)]
    last_results: bool,
}

struct DataPaths {
    session: PathBuf,
    results: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let cli = Cli::parse();

    let paths = data_paths(&cli)?;
    if cli.last_results {
        return print_last_results(&paths.results);
    }
    let questions = load_question_set(&cli)?;

    let saved = if cli.resume {
        let session = SessionFile::load(&paths.session)
            .wrap_err_with(|| format!("no resumable session at {}", paths.session.display()))?;
        Some(session)
    } else {
        None
    };

    let saved_seed = saved.as_ref().map(|session| session.seed);
    let seed = resolve_seed(cli.seed, saved_seed, generate_runtime_seed())
        .map_err(|message| eyre!(message))?;
    log::info!("starting session with seed {seed:?}");

    let mut game = Game::new(seed.value());
    let mut app = AppState::new();
    let mut journal = match &cli.journal {
        Some(path) => Some(
            JournalWriter::create(path, seed.value(), env!("CARGO_PKG_VERSION"))
                .wrap_err_with(|| format!("failed to create journal {}", path.display()))?,
        ),
        None => None,
    };

    match saved {
        Some(session) => app.resume(&mut game, session.snapshot, questions),
        None => app.start(&mut game, questions),
    }
    persist(&app, &game, journal.as_mut(), &paths)?;

    println!("Seed: {}", format_seed(game.seed()));
    for line in ladder_lines(game.state()) {
        println!("{line}");
    }
    run_loop(&mut app, &mut game, journal.as_mut(), &paths)
}

fn run_loop(
    app: &mut AppState,
    game: &mut Game,
    mut journal: Option<&mut JournalWriter>,
    paths: &DataPaths,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut shown_events = game.log().len();

    loop {
        println!();
        for line in question_card_lines(game.state()) {
            println!("{line}");
        }
        println!("{}", status_text(&app.mode));
        print!("> ");
        io::stdout().flush()?;

        let prompt_shown = Instant::now();
        let mut line = String::new();
        let command = if input.read_line(&mut line)? == 0 {
            Command::Quit
        } else {
            parse_command(&line).unwrap_or_else(|error| {
                println!("{error}");
                Command::Refresh
            })
        };

        if command == Command::Help {
            println!("{HELP_TEXT}");
            for rung in ladder_lines(game.state()) {
                println!("{rung}");
            }
        }
        app.step(game, prompt_shown.elapsed(), command);
        persist(app, game, journal.as_deref_mut(), paths)?;

        for event in &game.log()[shown_events..] {
            println!("* {}", event_log_line(event));
        }
        shown_events = game.log().len();

        match app.mode {
            AppMode::Finished(_) => {
                for line in finished_recap_lines(game) {
                    println!("{line}");
                }
                return Ok(());
            }
            AppMode::Quit => {
                println!("{}", status_text(&app.mode));
                return Ok(());
            }
            AppMode::Loading | AppMode::Answering | AppMode::Revealed { .. } => {}
        }
    }
}

/// Flushes accepted actions to the journal, then saves the session or the final results.
fn persist(
    app: &AppState,
    game: &Game,
    journal: Option<&mut JournalWriter>,
    paths: &DataPaths,
) -> Result<()> {
    if let Some(writer) = journal {
        for action in &app.accepted_inputs {
            writer.append(action).wrap_err("failed to append to journal")?;
        }
    }

    let state = game.state();
    if let Some(results) = ResultsFile::from_final_state(game.seed(), state) {
        results
            .write_atomic(&paths.results)
            .wrap_err_with(|| format!("failed to write {}", paths.results.display()))?;
        SessionFile::clear(&paths.session).wrap_err("failed to clear finished session")?;
        log::info!("results saved: {}", format_money(results.winnings));
    } else if state.is_loaded() && !app.accepted_inputs.is_empty() {
        SessionFile::capture(game.seed(), state)
            .write_atomic(&paths.session)
            .wrap_err_with(|| format!("failed to write {}", paths.session.display()))?;
    }
    Ok(())
}

fn data_paths(cli: &Cli) -> Result<DataPaths> {
    if let Some(dir) = &cli.data_dir {
        return Ok(DataPaths {
            session: dir.join("session.json"),
            results: dir.join("last_results.json"),
        });
    }
    let session = SessionFile::get_default_path()
        .ok_or_else(|| eyre!("no home directory for the session file"))?;
    let results = ResultsFile::get_default_path()
        .ok_or_else(|| eyre!("no home directory for the results file"))?;
    Ok(DataPaths { session, results })
}

fn load_question_set(cli: &Cli) -> Result<Vec<Question>> {
    let questions = match &cli.questions {
        Some(path) => {
            if cli.save_settings {
                log::warn!("--save-settings has no effect with --questions");
            }
            read_question_file(path)?
        }
        None => {
            let settings = SettingsFile::get_default_path().and_then(|path| read_settings(&path));
            let overrides =
                CliOverrides { question_count: cli.count, categories: cli.categories.clone() };
            let request =
                resolve_questions_request(settings.as_ref(), &EnvOverrides::from_env(), &overrides);
            if cli.save_settings {
                save_settings(&request)?;
            }
            PlaceholderSource.fetch(&request)?
        }
    };
    validate_questions(&questions)?;
    Ok(questions)
}

fn save_settings(request: &QuestionsRequest) -> Result<()> {
    let path = SettingsFile::get_default_path()
        .ok_or_else(|| eyre!("no home directory for the settings file"))?;
    SettingsFile::from_request(request)
        .write_atomic(&path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    println!("Settings saved to {}", path.display());
    Ok(())
}

fn print_last_results(path: &Path) -> Result<()> {
    let results = ResultsFile::load(path)
        .wrap_err_with(|| format!("no finished game recorded at {}", path.display()))?;
    for line in last_results_lines(&results) {
        println!("{line}");
    }
    Ok(())
}

fn read_question_file(path: &Path) -> Result<Vec<Question>> {
    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("invalid question set in {}", path.display()))
}

/// A missing settings file is normal; a broken one is reported and ignored.
fn read_settings(path: &Path) -> Option<SettingsFile> {
    match SettingsFile::load(path) {
        Ok(settings) => Some(settings),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("ignoring settings file {}: {e}", path.display());
            None
        }
    }
}
