//! Test helpers for dashboard service tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::UploadSettings;
use crate::core::intake::IntakePolicy;
use crate::core::random::{RandomSource, ScriptedRandom};
use crate::services::UploadQueue;

pub const TICK: Duration = Duration::from_millis(500);

/// Random source that records how many draws the scheduler made
#[derive(Clone)]
pub struct CountingRandom {
    script: ScriptedRandom,
    pub increments: Arc<AtomicUsize>,
    pub outcomes: Arc<AtomicUsize>,
}

impl CountingRandom {
    pub fn new(script: ScriptedRandom) -> Self {
        Self {
            script,
            increments: Arc::new(AtomicUsize::new(0)),
            outcomes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn increment_draws(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    pub fn outcome_draws(&self) -> usize {
        self.outcomes.load(Ordering::SeqCst)
    }
}

impl RandomSource for CountingRandom {
    fn next_increment(&mut self, max: f64) -> f64 {
        self.increments.fetch_add(1, Ordering::SeqCst);
        self.script.next_increment(max)
    }

    fn next_outcome(&mut self, success_probability: f64) -> bool {
        self.outcomes.fetch_add(1, Ordering::SeqCst);
        self.script.next_outcome(success_probability)
    }
}

pub fn create_test_settings() -> UploadSettings {
    UploadSettings {
        tick_interval: TICK,
        ..Default::default()
    }
}

/// Queue whose ticks add `step` percent and end with `success`, plus a handle on the draw counters
pub fn create_scripted_queue(step: f64, success: bool) -> (UploadQueue, CountingRandom) {
    let random = CountingRandom::new(ScriptedRandom::constant(step, success));
    let queue = UploadQueue::with_random(&create_test_settings(), IntakePolicy::default(), random.clone());
    (queue, random)
}

/// Queue that only moves when driven by hand
pub fn create_manual_queue(random: impl RandomSource + 'static) -> UploadQueue {
    let settings = UploadSettings {
        tick_interval: Duration::from_secs(24 * 60 * 60),
        ..Default::default()
    };
    UploadQueue::with_random(&settings, IntakePolicy::default(), random)
}
