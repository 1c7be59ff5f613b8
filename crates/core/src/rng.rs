//! Randomness port for the lifelines.
//! Fifty-fifty and the audience poll draw from a `RandomSource` so tests can pin exact outcomes.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits fill the f64 mantissa exactly.
        (self.rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct FixedSequence {
    draws: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Maps a unit draw onto `0..len`. `len` must be non-zero.
pub(crate) fn pick_index(source: &mut dyn RandomSource, len: usize) -> usize {
    let scaled = (source.next_unit() * len as f64) as usize;
    scaled.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draws_are_reproducible_and_in_range() {
        let mut left = SeededRandom::new(99);
        let mut right = SeededRandom::new(99);
        for _ in 0..256 {
            let a = left.next_unit();
            assert_eq!(a, right.next_unit());
            assert!((0.0..1.0).contains(&a));
        }
    }

    #[test]
    fn fixed_sequence_wraps_and_counts() {
        let mut seq = FixedSequence::new(vec![0.25, 0.75]);
        assert_eq!(seq.next_unit(), 0.25);
        assert_eq!(seq.next_unit(), 0.75);
        assert_eq!(seq.next_unit(), 0.25);
        assert_eq!(seq.consumed(), 3);
    }

    #[test]
    fn pick_index_never_overflows() {
        let mut seq = FixedSequence::new(vec![1.0, 0.0, 0.5]);
        assert_eq!(pick_index(&mut seq, 3), 2);
        assert_eq!(pick_index(&mut seq, 3), 0);
        assert_eq!(pick_index(&mut seq, 3), 1);
    }
}
