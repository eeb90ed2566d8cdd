use super::types::{MatchConfidence, MatchResult};
use crate::services::import::types::ImportAssignment;

const SUMMARY_SEPARATOR: &str = ", ";
const NO_RESULTS: &str = "No results";

impl MatchResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn uncertain_count(&self) -> usize {
        self.uncertain.len()
    }

    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    pub fn unmatched_name_count(&self) -> usize {
        self.unmatched_names.len()
    }

    /// Number of filenames represented, i.e. the size of the partition.
    pub fn total_count(&self) -> usize {
        self.match_count() + self.uncertain_count() + self.orphan_count()
    }

    pub fn has_uncertain(&self) -> bool {
        !self.uncertain.is_empty()
    }

    pub fn has_orphans(&self) -> bool {
        !self.orphans.is_empty()
    }

    pub fn is_fully_matched(&self) -> bool {
        self.uncertain_count() == 0 && self.orphan_count() == 0
    }

    /// Concatenate each list with `other`'s. No deduplication: callers must
    /// not merge results covering the same filenames.
    pub fn merge(&self, other: &MatchResult) -> MatchResult {
        MatchResult {
            matches: self.matches.iter().chain(&other.matches).cloned().collect(),
            uncertain: self.uncertain.iter().chain(&other.uncertain).cloned().collect(),
            unmatched_names: self
                .unmatched_names
                .iter()
                .chain(&other.unmatched_names)
                .cloned()
                .collect(),
            orphans: self.orphans.iter().chain(&other.orphans).cloned().collect(),
        }
    }

    /// Short human-readable digest, e.g.
    /// `"12 files matched, 2 files need review, 1 roster name without a photo"`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if self.match_count() > 0 {
            parts.push(format!("{} matched", files(self.match_count())));
        }
        if self.uncertain_count() > 0 {
            let verb = if self.uncertain_count() == 1 { "needs" } else { "need" };
            parts.push(format!("{} {verb} review", files(self.uncertain_count())));
        }
        if self.orphan_count() > 0 {
            parts.push(format!("{} without a roster match", files(self.orphan_count())));
        }
        if self.unmatched_name_count() > 0 {
            let n = self.unmatched_name_count();
            let noun = if n == 1 { "roster name" } else { "roster names" };
            parts.push(format!("{n} {noun} without a photo"));
        }

        if parts.is_empty() {
            NO_RESULTS.to_string()
        } else {
            parts.join(SUMMARY_SEPARATOR)
        }
    }

    /// Import assignments for every `Exact` match, plus `High` ones when
    /// `include_high` is set. Uncertain and orphan files are never included.
    pub fn auto_assignments(&self, include_high: bool) -> Vec<ImportAssignment> {
        self.matches
            .iter()
            .filter(|m| include_high || m.confidence == MatchConfidence::Exact)
            .map(|m| ImportAssignment::new(&m.filename, m.person_id))
            .collect()
    }
}

fn files(n: usize) -> String {
    if n == 1 {
        "1 file".to_string()
    } else {
        format!("{n} files")
    }
}

#[cfg(test)]
#[path = "tests/result_summary_tests.rs"]
mod tests;
