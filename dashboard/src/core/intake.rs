//! Upload intake policy
//!
//! Files that fail the type or size check are dropped without surfacing an
//! error; only a debug trace records the rejection.

use serde::{Deserialize, Serialize};
use shared::component_debug;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_WORD: &str = "application/msword";
pub const MIME_WORD_OOXML: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 10 MiB
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file offered for upload, as selected or dropped by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Why a candidate was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnsupportedType,
    TooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    pub accepted_types: Vec<String>,
    pub max_bytes: u64,
}

impl IntakePolicy {
    pub fn new(accepted_types: Vec<String>, max_bytes: u64) -> Self {
        Self { accepted_types, max_bytes }
    }

    pub fn check(&self, file: &FileCandidate) -> Result<(), Rejection> {
        if !self.accepted_types.iter().any(|t| t == &file.mime_type) {
            return Err(Rejection::UnsupportedType);
        }
        if file.size > self.max_bytes {
            return Err(Rejection::TooLarge);
        }
        Ok(())
    }

    pub fn accepts(&self, file: &FileCandidate) -> bool {
        self.check(file).is_ok()
    }

    /// Keep the admissible files in their original order
    pub fn admit(&self, files: Vec<FileCandidate>) -> Vec<FileCandidate> {
        files
            .into_iter()
            .filter(|file| match self.check(file) {
                Ok(()) => true,
                Err(reason) => {
                    component_debug!(
                        "intake",
                        file = %file.name,
                        mime_type = %file.mime_type,
                        size = file.size,
                        "Dropping upload candidate: {:?}",
                        reason
                    );
                    false
                }
            })
            .collect()
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            accepted_types: vec![MIME_PDF.to_string(), MIME_WORD.to_string(), MIME_WORD_OOXML.to_string()],
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}
