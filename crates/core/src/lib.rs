pub mod game;
pub mod journal;
pub mod journal_file;
pub mod prize;
pub mod questions;
pub mod replay;
pub mod rng;
pub mod state;
pub mod types;

pub use game::{Game, NO_ALTERNATIVE_MESSAGE, reduce, state_hash};
pub use journal::{InputJournal, InputRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use replay::*;
pub use rng::{FixedSequence, RandomSource, SeededRandom};
pub use state::GameState;
pub use types::*;
