//! Outcome types produced by the filename matcher.

use serde::{Deserialize, Serialize};

use crate::services::roster::PersonId;

pub type MediaId = i64;

/// An uploaded file as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub filename: String,
    #[serde(default)]
    pub media_id: Option<MediaId>,
}

impl MediaFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            media_id: None,
        }
    }

    pub fn with_media_id(filename: impl Into<String>, media_id: MediaId) -> Self {
        Self {
            filename: filename.into(),
            media_id: Some(media_id),
        }
    }
}

/// Confidence tier of a resolved pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchConfidence {
    /// Single candidate clearly ahead of the rest.
    High,
    /// Canonical keys identical.
    Exact,
}

impl std::fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchConfidence::Exact => write!(f, "Exact"),
            MatchConfidence::High => write!(f, "High"),
        }
    }
}

/// A filename resolved to exactly one roster member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub roster_name: String,
    pub person_id: PersonId,
    pub filename: String,
    pub confidence: MatchConfidence,
    #[serde(default)]
    pub media_id: Option<MediaId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UncertainReason {
    /// Two or more roster names qualify.
    MultipleCandidates,
    /// One roster name qualifies, but not strongly enough to accept.
    LowConfidence,
}

impl std::fmt::Display for UncertainReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UncertainReason::MultipleCandidates => write!(f, "MultipleCandidates"),
            UncertainReason::LowConfidence => write!(f, "LowConfidence"),
        }
    }
}

/// Roster member proposed for an unresolved filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub person_id: PersonId,
    pub roster_name: String,
    pub score: f64,
}

/// A filename that needs a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertainEntry {
    pub filename: String,
    /// Every qualifying candidate, best first.
    pub candidates: Vec<ScoredCandidate>,
    pub reason: UncertainReason,
    #[serde(default)]
    pub media_id: Option<MediaId>,
}

impl UncertainEntry {
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|c| c.roster_name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrphanReason {
    /// The roster was empty.
    EmptyRoster,
    /// No roster name reached the candidate threshold.
    BelowThreshold,
    /// Nothing name-like was left after stripping the filename.
    UnreadableName,
}

impl std::fmt::Display for OrphanReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrphanReason::EmptyRoster => write!(f, "EmptyRoster"),
            OrphanReason::BelowThreshold => write!(f, "BelowThreshold"),
            OrphanReason::UnreadableName => write!(f, "UnreadableName"),
        }
    }
}

/// A filename with no plausible roster member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanEntry {
    pub filename: String,
    #[serde(default)]
    pub media_id: Option<MediaId>,
    /// Closest rejected roster name. Display only; never auto-assigned.
    #[serde(default)]
    pub suggested_name: Option<String>,
    #[serde(default)]
    pub reason: Option<OrphanReason>,
}

/// Classification of a single filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FilenameOutcome {
    Matched(MatchEntry),
    Uncertain(UncertainEntry),
    Orphan(OrphanEntry),
}

impl FilenameOutcome {
    pub fn filename(&self) -> &str {
        match self {
            FilenameOutcome::Matched(entry) => &entry.filename,
            FilenameOutcome::Uncertain(entry) => &entry.filename,
            FilenameOutcome::Orphan(entry) => &entry.filename,
        }
    }
}

/// Aggregated result of one or more matcher runs.
///
/// Every submitted filename sits in exactly one of `matches`, `uncertain` or
/// `orphans`. `unmatched_names` is a separate axis: roster names that did not
/// receive an `Exact` or `High` match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub(crate) matches: Vec<MatchEntry>,
    pub(crate) uncertain: Vec<UncertainEntry>,
    pub(crate) unmatched_names: Vec<String>,
    pub(crate) orphans: Vec<OrphanEntry>,
}

impl MatchResult {
    pub fn new(
        matches: Vec<MatchEntry>,
        uncertain: Vec<UncertainEntry>,
        unmatched_names: Vec<String>,
        orphans: Vec<OrphanEntry>,
    ) -> Self {
        Self {
            matches,
            uncertain,
            unmatched_names,
            orphans,
        }
    }

    /// Identity element of `merge`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split per-filename outcomes into the three lists, keeping input order.
    pub fn from_outcomes(
        outcomes: impl IntoIterator<Item = FilenameOutcome>,
        unmatched_names: Vec<String>,
    ) -> Self {
        let mut result = Self {
            unmatched_names,
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                FilenameOutcome::Matched(entry) => result.matches.push(entry),
                FilenameOutcome::Uncertain(entry) => result.uncertain.push(entry),
                FilenameOutcome::Orphan(entry) => result.orphans.push(entry),
            }
        }
        result
    }

    pub fn matches(&self) -> &[MatchEntry] {
        &self.matches
    }

    pub fn uncertain(&self) -> &[UncertainEntry] {
        &self.uncertain
    }

    pub fn unmatched_names(&self) -> &[String] {
        &self.unmatched_names
    }

    pub fn orphans(&self) -> &[OrphanEntry] {
        &self.orphans
    }
}
