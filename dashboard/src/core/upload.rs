//! Upload entry lifecycle
//!
//! ```text
//! Uploading(progress) --progress reaches 100--> Success | Error
//! ```
//!
//! `Success` and `Error` are terminal. The outcome is decided once, at the
//! moment progress first saturates. Whatever drives the entry (the simulated
//! scheduler or a real transport) only reports progress deltas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::intake::FileCandidate;
use shared::SharedError;

pub const COMPLETE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UploadId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(UploadId)
            .map_err(|_| SharedError::InvalidUuid { input: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, UploadStatus::Uploading)
    }
}

/// Result of feeding one progress report into an entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Still uploading at the given progress
    Progressed(f64),
    /// Progress saturated and the entry resolved to a terminal status
    Resolved(UploadStatus),
    /// Entry was already terminal; nothing changed
    Ignored,
}

impl TickOutcome {
    /// Whether the driver should keep scheduling ticks
    pub fn keeps_running(&self) -> bool {
        matches!(self, TickOutcome::Progressed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadEntry {
    pub id: UploadId,
    pub name: String,
    pub size: u64,
    pub status: UploadStatus,
    pub progress: f64,
}

impl UploadEntry {
    pub fn new(file: &FileCandidate) -> Self {
        Self {
            id: UploadId::new(),
            name: file.name.clone(),
            size: file.size,
            status: UploadStatus::Uploading,
            progress: 0.0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Add `delta` percent; `succeeded` is consulted only when this report saturates progress
    pub fn apply_progress(&mut self, delta: f64, succeeded: impl FnOnce() -> bool) -> TickOutcome {
        if self.is_terminal() {
            return TickOutcome::Ignored;
        }

        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let next = (self.progress + delta).min(COMPLETE);

        if next >= COMPLETE {
            self.progress = COMPLETE;
            self.status = if succeeded() { UploadStatus::Success } else { UploadStatus::Error };
            TickOutcome::Resolved(self.status)
        } else {
            self.progress = next;
            TickOutcome::Progressed(next)
        }
    }

    pub fn formatted_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// Human readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `5 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
