use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the lifeline seed of a session came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    /// Carried over from a saved session.
    Resumed(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Resumed(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// A resumed session keeps its seed; otherwise `--seed` wins over a generated one.
pub fn resolve_seed(
    cli_seed: Option<u64>,
    resumed_seed: Option<u64>,
    generated_seed: u64,
) -> Result<SeedChoice, String> {
    match (cli_seed, resumed_seed) {
        (Some(cli), Some(resumed)) if cli != resumed => {
            Err(format!("--seed {cli} conflicts with the saved session seed {resumed}"))
        }
        (_, Some(resumed)) => Ok(SeedChoice::Resumed(resumed)),
        (Some(cli), None) => Ok(SeedChoice::Cli(cli)),
        (None, None) => Ok(SeedChoice::Generated(generated_seed)),
    }
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
