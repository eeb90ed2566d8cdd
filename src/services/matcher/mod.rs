//! Roster-to-filename reconciliation.
//!
//! Turns a roster and a batch of loosely named uploads into `MatchResult`s
//! that a reviewer can resolve into an `AssignmentPlan`.

pub mod assignment;
pub mod filename_matcher;
pub mod normalizer;
pub mod result_summary;
pub mod scoring;
pub mod types;

pub use assignment::AssignmentPlan;
pub use filename_matcher::{match_filenames, match_media};
pub use normalizer::{canonicalize, filename_key};
pub use scoring::similarity;
pub use types::{
    FilenameOutcome, MatchConfidence, MatchEntry, MatchResult, MediaFile, MediaId, OrphanEntry,
    OrphanReason, ScoredCandidate, UncertainEntry, UncertainReason,
};
