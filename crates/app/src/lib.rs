pub mod app_loop;
pub mod command;
pub mod results_file;
pub mod seed;
pub mod session_file;
pub mod settings;

use std::time::{SystemTime, UNIX_EPOCH};

use ladder_core::RunOutcome;

pub const APP_NAME: &str = "Ladder";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Dollar amount with thousands separators, e.g. `$1,000,000`.
pub fn format_money(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

/// Map a `RunOutcome` to its reason code string.
pub fn outcome_code(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Won => "WIN_TOP_PRIZE",
        RunOutcome::Lost => "LOSS_SAFE_PRIZE",
        RunOutcome::WalkedAway => "WALK_AWAY_BANKED",
    }
}

pub(crate) fn unix_time_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(12345), "12345");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn format_snapshot_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(255), "0x00000000000000ff");
        assert_eq!(format_snapshot_hash(u64::MAX), "0xffffffffffffffff");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
    }

    #[test]
    fn format_money_groups_thousands() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(100), "$100");
        assert_eq!(format_money(1_000), "$1,000");
        assert_eq!(format_money(32_000), "$32,000");
        assert_eq!(format_money(125_000), "$125,000");
        assert_eq!(format_money(1_000_000), "$1,000,000");
    }

    #[test]
    fn outcome_codes_are_correct() {
        assert_eq!(outcome_code(RunOutcome::Won), "WIN_TOP_PRIZE");
        assert_eq!(outcome_code(RunOutcome::Lost), "LOSS_SAFE_PRIZE");
        assert_eq!(outcome_code(RunOutcome::WalkedAway), "WALK_AWAY_BANKED");
    }
}
