//! Roster-to-photograph reconciliation.
//!
//! Matching (`services::matcher`) pairs uploaded filenames with roster names
//! and reports what a human still has to decide. Import
//! (`services::import`) archives the confirmed assignments one by one and
//! reports per-item outcomes.

pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::config::{ConfigService, ImportSettings, IntakeSettings, MatchThresholds};
pub use services::import::{
    ArchivePhotoRecord, ArchiveStore, BulkImportExecutor, ImportAssignment, ImportControl,
    ImportFailure, ImportOutcome, ImportReport, ImportStatus, PhotoArchive, UploadedFile,
};
pub use services::matcher::{
    canonicalize, match_filenames, match_media, AssignmentPlan, MatchConfidence, MatchResult,
};
pub use services::roster::{PersonId, RosterEntry, RosterLookup, SqliteRoster};
pub use types::errors::{ArchiveError, IntakeError, IntakeResult};
