//! Assignment, outcome and report types for bulk import.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::services::fs_utils::path_utils::basename;
use crate::services::roster::PersonId;

/// Confirmed filename → person mapping. The filename is always a bare basename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportAssignment {
    pub filename: String,
    pub person_id: PersonId,
}

impl ImportAssignment {
    pub fn new(filename: &str, person_id: PersonId) -> Self {
        Self {
            filename: basename(filename).to_string(),
            person_id,
        }
    }

    /// Build assignments from `(filename, person)` pairs, keeping their order.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, PersonId)>) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(filename, person_id)| Self::new(filename, person_id))
            .collect()
    }
}

/// An uploaded file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: basename(filename).to_string(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStatus {
    Success,
    Skipped,
    Failed,
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStatus::Success => write!(f, "Success"),
            ImportStatus::Skipped => write!(f, "Skipped"),
            ImportStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Display-safe reason attached to a skipped or failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportFailure {
    #[serde(rename = "file not found")]
    FileNotFound,
    #[serde(rename = "person not found")]
    PersonNotFound,
    #[serde(rename = "upload error")]
    UploadError,
}

impl ImportFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFailure::FileNotFound => "file not found",
            ImportFailure::PersonNotFound => "person not found",
            ImportFailure::UploadError => "upload error",
        }
    }

    pub fn status(&self) -> ImportStatus {
        match self {
            ImportFailure::FileNotFound | ImportFailure::PersonNotFound => ImportStatus::Skipped,
            ImportFailure::UploadError => ImportStatus::Failed,
        }
    }
}

impl std::fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one assignment. Created once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub filename: String,
    pub status: ImportStatus,
    pub reason: Option<ImportFailure>,
    pub person_id: Option<PersonId>,
    pub photo_id: Option<i64>,
}

impl ImportOutcome {
    pub fn success(filename: &str, person_id: PersonId, photo_id: i64) -> Self {
        Self {
            filename: filename.to_string(),
            status: ImportStatus::Success,
            reason: None,
            person_id: Some(person_id),
            photo_id: Some(photo_id),
        }
    }

    pub fn rejected(filename: &str, reason: ImportFailure, person_id: PersonId) -> Self {
        Self {
            filename: filename.to_string(),
            status: reason.status(),
            reason: Some(reason),
            person_id: Some(person_id),
            photo_id: None,
        }
    }
}

/// Outcomes of one bulk import plus running tallies.
///
/// Tallies are only ever changed by `record`, so they always agree with the
/// statuses in `results`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    uploaded: usize,
    skipped: usize,
    failed: usize,
    results: Vec<ImportOutcome>,
    not_attempted: usize,
    interrupted: bool,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: ImportOutcome) {
        match outcome.status {
            ImportStatus::Success => self.uploaded += 1,
            ImportStatus::Skipped => self.skipped += 1,
            ImportStatus::Failed => self.failed += 1,
        }
        self.results.push(outcome);
    }

    /// Note an assignment that was never attempted because the run was stopped.
    pub(crate) fn record_not_attempted(&mut self) {
        self.not_attempted += 1;
        self.interrupted = true;
    }

    pub fn uploaded(&self) -> usize {
        self.uploaded
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn results(&self) -> &[ImportOutcome] {
        &self.results
    }

    /// Assignments that never ran. Always zero for a run that was not interrupted.
    pub fn not_attempted(&self) -> usize {
        self.not_attempted
    }

    /// `true` when the run stopped before every assignment was attempted.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn outcome_for(&self, filename: &str) -> Option<&ImportOutcome> {
        self.results.iter().find(|o| o.filename == filename)
    }
}

/// Caller-side handle to stop a running import between items.
#[derive(Debug, Clone, Default)]
pub struct ImportControl {
    cancelled: Arc<AtomicBool>,
}

impl ImportControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
