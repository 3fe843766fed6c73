//! Upload queue and progress scheduler
//!
//! The queue exclusively owns its entries. Each uploading entry has one
//! timer task that applies a tick every `tick_interval`; the task ends when
//! the entry resolves, is dismissed, or the queue is dropped. Entries,
//! timers and the random source share one lock, so a tick and a mutator
//! never interleave.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use shared::{component_debug, component_info};

use crate::config::UploadSettings;
use crate::core::intake::{FileCandidate, IntakePolicy};
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::upload::{TickOutcome, UploadEntry, UploadId, UploadStatus};
use crate::error::{DashboardError, DashboardResult};

const COMPONENT: &str = "uploads";

/// Counts by status, for the upload panel header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub total: usize,
    pub uploading: usize,
    pub succeeded: usize,
    pub failed: usize,
}

struct QueueInner {
    entries: Vec<UploadEntry>,
    timers: HashMap<UploadId, JoinHandle<()>>,
    random: Box<dyn RandomSource>,
    max_increment: f64,
    success_probability: f64,
}

impl QueueInner {
    /// Feed `delta` (or a random increment) into one entry
    fn advance(&mut self, id: UploadId, delta: Option<f64>) -> Option<TickOutcome> {
        let random = &mut self.random;
        let entry = self.entries.iter_mut().find(|entry| entry.id == id)?;

        let delta = delta.unwrap_or_else(|| random.next_increment(self.max_increment));
        let success_probability = self.success_probability;
        let outcome = entry.apply_progress(delta, || random.next_outcome(success_probability));

        if !outcome.keeps_running() {
            self.cancel_timer(id);
        }
        Some(outcome)
    }

    /// Idempotent: cancelling an id without a live timer is a no-op
    fn cancel_timer(&mut self, id: UploadId) -> bool {
        match self.timers.remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

impl Drop for QueueInner {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[derive(Clone)]
pub struct UploadQueue {
    inner: Arc<Mutex<QueueInner>>,
    policy: IntakePolicy,
    tick_interval: Duration,
}

impl UploadQueue {
    /// Queue drawing randomness from `settings.seed`, or from entropy
    pub fn new(settings: &UploadSettings, policy: IntakePolicy) -> Self {
        let random = match settings.seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        Self::with_random(settings, policy, random)
    }

    pub fn with_random(settings: &UploadSettings, policy: IntakePolicy, random: impl RandomSource + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueInner {
                entries: Vec::new(),
                timers: HashMap::new(),
                random: Box::new(random),
                max_increment: settings.max_increment,
                success_probability: settings.success_probability,
            })),
            policy,
            tick_interval: settings.tick_interval,
        }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Admit `files` through the intake policy and start uploading them
    ///
    /// Rejected files are dropped silently. Returns the entries created, in
    /// the order the files were given; existing entries are kept.
    pub async fn enqueue(&self, files: Vec<FileCandidate>) -> Vec<UploadEntry> {
        let offered = files.len();
        let admitted = self.policy.admit(files);
        if admitted.is_empty() {
            return Vec::new();
        }

        let mut inner = self.inner.lock().await;
        let mut created = Vec::with_capacity(admitted.len());
        for file in &admitted {
            let entry = UploadEntry::new(file);
            let timer = self.spawn_timer(entry.id);
            inner.timers.insert(entry.id, timer);
            inner.entries.push(entry.clone());
            created.push(entry);
        }

        component_info!(
            COMPONENT,
            offered,
            admitted = created.len(),
            "📤 Queued {} upload(s)",
            created.len()
        );
        created
    }

    fn spawn_timer(&self, id: UploadId) -> JoinHandle<()> {
        let queue: Weak<Mutex<QueueInner>> = Arc::downgrade(&self.inner);
        let period = self.tick_interval;

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(inner) = queue.upgrade() else {
                    break;
                };
                let outcome = inner.lock().await.advance(id, None);

                match outcome {
                    Some(TickOutcome::Progressed(progress)) => {
                        component_debug!(COMPONENT, upload = %id, progress, "Upload progressed");
                    }
                    Some(TickOutcome::Resolved(status)) => {
                        component_info!(COMPONENT, upload = %id, "Upload finished: {:?}", status);
                        break;
                    }
                    Some(TickOutcome::Ignored) | None => break,
                }
            }
        })
    }

    /// Apply one scheduler tick to `id` immediately; `None` if the id is unknown
    pub async fn tick(&self, id: UploadId) -> Option<TickOutcome> {
        self.inner.lock().await.advance(id, None)
    }

    /// Feed progress reported by an external transport into the same state machine
    pub async fn report_progress(&self, id: UploadId, delta: f64) -> DashboardResult<TickOutcome> {
        self.inner
            .lock()
            .await
            .advance(id, Some(delta))
            .ok_or_else(|| DashboardError::UploadNotFound { id: id.to_string() })
    }

    /// Remove an entry in any state, cancelling its timer if it still has one
    pub async fn dismiss(&self, id: UploadId) -> DashboardResult<UploadEntry> {
        let mut inner = self.inner.lock().await;
        let index = inner
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| DashboardError::UploadNotFound { id: id.to_string() })?;

        let entry = inner.entries.remove(index);
        let cancelled = inner.cancel_timer(id);
        component_info!(COMPONENT, upload = %id, cancelled, "🗑️ Dismissed upload {}", entry.name);
        Ok(entry)
    }

    /// Remove every entry and stop every timer
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.cancel_all();
        let removed = inner.entries.len();
        inner.entries.clear();
        removed
    }

    pub async fn entries(&self) -> Vec<UploadEntry> {
        self.inner.lock().await.entries.clone()
    }

    pub async fn get(&self, id: UploadId) -> Option<UploadEntry> {
        self.inner.lock().await.entries.iter().find(|entry| entry.id == id).cloned()
    }

    /// Number of entries that still own a timer
    pub async fn active_timers(&self) -> usize {
        self.inner.lock().await.timers.len()
    }

    pub async fn summary(&self) -> UploadSummary {
        let inner = self.inner.lock().await;
        inner.entries.iter().fold(
            UploadSummary {
                total: inner.entries.len(),
                ..Default::default()
            },
            |mut summary, entry| {
                match entry.status {
                    UploadStatus::Uploading => summary.uploading += 1,
                    UploadStatus::Success => summary.succeeded += 1,
                    UploadStatus::Error => summary.failed += 1,
                }
                summary
            },
        )
    }
}
