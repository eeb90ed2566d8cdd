//! Final filename → person mapping handed to the importer.
//!
//! Starts from the automatically accepted matches and collects the reviewer's
//! decisions for uncertain and orphan files.

use serde::{Deserialize, Serialize};

use super::types::MatchResult;
use crate::services::fs_utils::path_utils::basename;
use crate::services::import::types::ImportAssignment;
use crate::services::roster::PersonId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    assignments: Vec<ImportAssignment>,
}

impl AssignmentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the plan with the matcher's accepted matches.
    pub fn from_matches(result: &MatchResult, include_high: bool) -> Self {
        let mut plan = Self::new();
        for assignment in result.auto_assignments(include_high) {
            plan.resolve(&assignment.filename, assignment.person_id);
        }
        plan
    }

    /// Assign `filename` to `person_id`. Replaces an earlier decision for the
    /// same file in place and returns the person it pointed to.
    pub fn resolve(&mut self, filename: &str, person_id: PersonId) -> Option<PersonId> {
        let name = basename(filename);
        if let Some(existing) = self.assignments.iter_mut().find(|a| a.filename == name) {
            let previous = existing.person_id;
            existing.person_id = person_id;
            return Some(previous);
        }
        self.assignments
            .push(ImportAssignment::new(name, person_id));
        None
    }

    /// Drop the decision for `filename`, if any.
    pub fn remove(&mut self, filename: &str) -> bool {
        let name = basename(filename);
        let before = self.assignments.len();
        self.assignments.retain(|a| a.filename != name);
        before != self.assignments.len()
    }

    pub fn person_for(&self, filename: &str) -> Option<PersonId> {
        let name = basename(filename);
        self.assignments
            .iter()
            .find(|a| a.filename == name)
            .map(|a| a.person_id)
    }

    /// Uncertain and orphan filenames from `result` that still lack a decision.
    pub fn pending_review<'r>(&self, result: &'r MatchResult) -> Vec<&'r str> {
        result
            .uncertain()
            .iter()
            .map(|u| u.filename.as_str())
            .chain(result.orphans().iter().map(|o| o.filename.as_str()))
            .filter(|filename| self.person_for(filename).is_none())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignments(&self) -> &[ImportAssignment] {
        &self.assignments
    }

    pub fn into_assignments(self) -> Vec<ImportAssignment> {
        self.assignments
    }
}

#[cfg(test)]
#[path = "tests/assignment_tests.rs"]
mod tests;
