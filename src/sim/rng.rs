//! Injected pseudo-random sources
//!
//! The generator only ever asks for bounded integers, so the seam is a single
//! method. Sessions seeded with the same value replay identically.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform integer draws
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`; `bound` is never zero
    fn below(&mut self, bound: u32) -> u32;
}

/// Seeded PCG source
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgSource {
    fn below(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound.max(1))
    }
}

/// Replays a fixed list of draws, then repeats `fallback`
///
/// Each scripted value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
        }
    }

    /// Repeats a single value forever
    pub fn constant(value: u32) -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: value,
        }
    }

    /// A source that never triggers a randomized event
    pub fn quiet() -> Self {
        Self::constant(crate::consts::RANDOM_DRAW_BOUND - 1)
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn below(&mut self, bound: u32) -> u32 {
        let value = self.draws.pop_front().unwrap_or(self.fallback);
        value % bound.max(1)
    }
}
