//! Prize ladder, checkpoints, difficulty bands and per-level countdowns.

use crate::types::Difficulty;

pub const MAX_LEVEL: u8 = 15;

pub const CHECKPOINTS: [u8; 2] = [5, 10];

/// Prize in dollars for levels 1 through 15, in order.
pub const LADDER: [u32; MAX_LEVEL as usize] = [
    100, 200, 300, 500, 1_000, // 5 is a checkpoint
    2_000, 4_000, 8_000, 16_000, 32_000, // 10 is a checkpoint
    64_000, 125_000, 250_000, 500_000, 1_000_000,
];

pub fn prize_for_level(level: u8) -> u32 {
    match level {
        1..=MAX_LEVEL => LADDER[usize::from(level - 1)],
        _ => 0,
    }
}

pub fn is_checkpoint(level: u8) -> bool {
    CHECKPOINTS.contains(&level)
}

/// Highest checkpoint at or below `level`.
///
/// Reference only: the live `last_safe_level` is raised incrementally on
/// correct lock-ins and never recomputed from the current level.
pub fn last_safe_level_for(level: u8) -> u8 {
    if level >= 10 {
        10
    } else if level >= 5 {
        5
    } else {
        0
    }
}

pub fn difficulty_for_level(level: u8) -> Difficulty {
    match level {
        0..=5 => Difficulty::Easy,
        6..=10 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

/// Countdown length in seconds for a question at `level`.
pub fn time_budget(level: u8) -> u32 {
    match difficulty_for_level(level) {
        Difficulty::Easy => 30,
        Difficulty::Medium => 45,
        Difficulty::Hard => 60,
    }
}
