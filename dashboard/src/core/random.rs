//! Random source for the upload simulation
//!
//! Progress increments and the success/failure coin flip both draw from a
//! [`RandomSource`], so a queue can be driven by a fixed seed or by a
//! scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Draw a progress increment in `[0, max)`
    fn next_increment(&mut self, max: f64) -> f64;

    /// Flip the terminal coin; `true` means the upload succeeded
    fn next_outcome(&mut self, success_probability: f64) -> bool;
}

/// `StdRng`-backed random source
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl RandomSource for SeededRandom {
    fn next_increment(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..max)
    }

    fn next_outcome(&mut self, success_probability: f64) -> bool {
        self.rng.gen_bool(success_probability.clamp(0.0, 1.0))
    }
}

/// Replays fixed increments and outcomes, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    increments: Vec<f64>,
    outcomes: Vec<bool>,
    next_increment: usize,
    next_outcome: usize,
}

impl ScriptedRandom {
    pub fn new(increments: Vec<f64>, outcomes: Vec<bool>) -> Self {
        Self {
            increments,
            outcomes,
            next_increment: 0,
            next_outcome: 0,
        }
    }

    /// Every tick adds `step`; every upload ends with `success`
    pub fn constant(step: f64, success: bool) -> Self {
        Self::new(vec![step], vec![success])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_increment(&mut self, _max: f64) -> f64 {
        if self.increments.is_empty() {
            return 0.0;
        }
        let value = self.increments[self.next_increment % self.increments.len()];
        self.next_increment += 1;
        value
    }

    fn next_outcome(&mut self, _success_probability: f64) -> bool {
        if self.outcomes.is_empty() {
            return true;
        }
        let value = self.outcomes[self.next_outcome % self.outcomes.len()];
        self.next_outcome += 1;
        value
    }
}
