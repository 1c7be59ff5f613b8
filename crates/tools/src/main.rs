use anyhow::{Context, Result, anyhow};
use clap::Parser;
use ladder_core::{InputJournal, ReplayResult, load_journal_from_file, replay::replay_to_end};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal to replay: a chained `.jsonl` file or a plain `.json` export
    #[arg(short, long)]
    journal: PathBuf,
}

fn load_journal(path: &Path) -> Result<InputJournal> {
    if path.extension().is_some_and(|extension| extension == "json") {
        let journal_data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
        return serde_json::from_str(&journal_data)
            .with_context(|| "Failed to deserialize journal JSON");
    }

    let loaded = load_journal_from_file(path)
        .with_context(|| format!("Failed to load journal file: {}", path.display()))?;
    log::debug!("journal chain verified up to seq {}", loaded.next_seq);
    Ok(loaded.journal)
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let journal = load_journal(&args.journal)?;
    let result: ReplayResult = replay_to_end(&journal)
        .map_err(|e| anyhow!("Replay failed during execution: {e}"))?;

    println!("Replay complete.");
    println!("Seed: {}", journal.seed);
    println!("Applied inputs: {}", result.applied_inputs);
    if result.ignored_inputs > 0 {
        println!(
            "Ignored inputs: {} (journal does not match current rules)",
            result.ignored_inputs
        );
    }
    match result.final_outcome {
        Some(outcome) => println!("Outcome: {outcome:?}"),
        None => println!("Outcome: still in progress"),
    }
    println!(
        "Winnings: {} (level {}, safe level {})",
        result.results.winnings, result.results.level, result.results.last_safe_level
    );
    println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);

    Ok(())
}
