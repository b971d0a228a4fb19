//! Injectable randomness for damage variance, duel zones and exploration.
//!
//! Handlers take `&mut dyn GameRng` so the host can hand in a seeded
//! [`StdGameRng`] while tests pin every roll with a [`ScriptedRng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait GameRng {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `lo..=hi`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform float in `[lo, hi]`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// `rand`-backed generator used by the host.
pub struct StdGameRng {
    inner: StdRng,
}

impl StdGameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl GameRng for StdGameRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.inner.gen_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Deterministic generator replaying queued unit values.
///
/// Every draw consumes one value in `[0, 1)`; integer draws scale it onto
/// the requested range. When the queue runs dry the fallback value repeats.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// Generator that always yields the same unit value.
    pub fn constant(value: f64) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }

    fn draw(&mut self) -> f64 {
        self.values
            .pop_front()
            .unwrap_or(self.fallback)
            .clamp(0.0, 0.999_999_999)
    }
}

impl GameRng for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.draw()
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        let span = (hi - lo + 1) as f64;
        lo + (self.draw() * span) as u32
    }

    fn index(&mut self, len: usize) -> usize {
        ((self.draw() * len as f64) as usize).min(len.saturating_sub(1))
    }
}
