//! Bulk import of confirmed filename → person assignments.
//!
//! One batch roster lookup, then one independent attempt per assignment.
//! Item failures become outcomes; only a failed roster lookup fails the run.

use futures_util::stream::{self, StreamExt};
use futures_util::FutureExt;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;

use super::archive::ArchiveStore;
use super::types::{
    ImportAssignment, ImportControl, ImportFailure, ImportOutcome, ImportReport, UploadedFile,
};
use crate::services::config::ImportSettings;
use crate::services::core::PersonLocks;
use crate::services::fs_utils::path_utils::basename;
use crate::services::roster::{PersonId, RosterEntry, RosterLookup};
use crate::types::errors::{IntakeError, IntakeResult};

pub struct BulkImportExecutor<R, A> {
    roster: R,
    archive: A,
    settings: ImportSettings,
    locks: PersonLocks,
}

impl<R: RosterLookup, A: ArchiveStore> BulkImportExecutor<R, A> {
    pub fn new(roster: R, archive: A, settings: ImportSettings) -> Self {
        Self {
            roster,
            archive,
            settings,
            locks: PersonLocks::new(),
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Import every assignment. Outcomes come back in assignment order.
    ///
    /// Assignments are keyed by basename. When several name the same file it
    /// is imported once, at the first position, for the last person given.
    pub async fn execute(
        &self,
        assignments: &[ImportAssignment],
        files: &HashMap<String, UploadedFile>,
        year: i32,
        activate_first: bool,
    ) -> IntakeResult<ImportReport> {
        self.execute_with_control(assignments, files, year, activate_first, &ImportControl::new())
            .await
    }

    /// Like `execute`, but stops starting new items once `control` is cancelled.
    /// Items already in flight finish; the rest are counted as not attempted.
    pub async fn execute_with_control(
        &self,
        assignments: &[ImportAssignment],
        files: &HashMap<String, UploadedFile>,
        year: i32,
        activate_first: bool,
        control: &ImportControl,
    ) -> IntakeResult<ImportReport> {
        log::info!(
            "Starting bulk import of {} assignment(s) for year {} (activate first: {})",
            assignments.len(),
            year,
            activate_first
        );

        let assignments = dedupe_by_basename(assignments);
        let person_ids = unique_person_ids(&assignments);
        let roster = self.roster.load_roster(&person_ids).await.map_err(|e| {
            log::error!("Roster lookup for bulk import failed: {e}");
            match e {
                IntakeError::RosterUnavailable(_) => e,
                other => IntakeError::RosterUnavailable(other.to_string()),
            }
        })?;

        let file_index = index_files(files);
        let parallel = self.settings.max_parallel_uploads.max(1);

        let outcomes: Vec<Option<ImportOutcome>> = stream::iter(&assignments)
            .map(|assignment| {
                let file_index = &file_index;
                let roster = &roster;
                async move {
                    if control.is_cancelled() {
                        return None;
                    }
                    Some(
                        self.import_one(assignment, file_index, roster, year, activate_first)
                            .await,
                    )
                }
            })
            .buffered(parallel)
            .collect()
            .await;

        let mut report = ImportReport::new();
        for outcome in outcomes {
            match outcome {
                Some(outcome) => report.record(outcome),
                None => report.record_not_attempted(),
            }
        }

        if report.interrupted() {
            log::warn!(
                "Bulk import interrupted: {} assignment(s) not attempted",
                report.not_attempted()
            );
        }
        log::info!(
            "Bulk import finished: {} uploaded, {} skipped, {} failed",
            report.uploaded(),
            report.skipped(),
            report.failed()
        );

        Ok(report)
    }

    async fn import_one(
        &self,
        assignment: &ImportAssignment,
        files: &HashMap<&str, &UploadedFile>,
        roster: &HashMap<PersonId, RosterEntry>,
        year: i32,
        activate_first: bool,
    ) -> ImportOutcome {
        let filename = basename(&assignment.filename);
        let person_id = assignment.person_id;

        let Some(file) = files.get(filename).copied() else {
            log::warn!("Skipping '{}': no uploaded file with that name", filename);
            return ImportOutcome::rejected(filename, ImportFailure::FileNotFound, person_id);
        };
        if !roster.contains_key(&person_id) {
            log::warn!("Skipping '{}': person {} is not on the roster", filename, person_id);
            return ImportOutcome::rejected(filename, ImportFailure::PersonNotFound, person_id);
        }

        let file: Cow<'_, UploadedFile> = if file.filename == filename {
            Cow::Borrowed(file)
        } else {
            Cow::Owned(UploadedFile::new(filename, file.bytes.clone()))
        };

        // Same-person uploads must not race on the first-active check.
        let _guard = if activate_first {
            Some(self.locks.lock(person_id).await)
        } else {
            None
        };

        let attempt = AssertUnwindSafe(self.archive.create_archive_photo(
            person_id,
            &file,
            year,
            activate_first,
        ))
        .catch_unwind()
        .await;

        match attempt {
            Ok(Ok(record)) => ImportOutcome::success(filename, person_id, record.id),
            Ok(Err(e)) => {
                log::error!(
                    "Failed to import '{}' for person {}: {}",
                    filename,
                    person_id,
                    e
                );
                ImportOutcome::rejected(filename, ImportFailure::UploadError, person_id)
            }
            Err(_) => {
                log::error!(
                    "Archive upload panicked while importing '{}' for person {}",
                    filename,
                    person_id
                );
                ImportOutcome::rejected(filename, ImportFailure::UploadError, person_id)
            }
        }
    }
}

/// One assignment per basename, at its first position, with the last person.
fn dedupe_by_basename(assignments: &[ImportAssignment]) -> Vec<ImportAssignment> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(assignments.len());
    let mut deduped: Vec<ImportAssignment> = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let name = basename(&assignment.filename);
        match positions.get(name) {
            Some(&i) => {
                log::warn!(
                    "'{}' is assigned more than once; using person {} instead of {}",
                    name,
                    assignment.person_id,
                    deduped[i].person_id
                );
                deduped[i].person_id = assignment.person_id;
            }
            None => {
                positions.insert(name, deduped.len());
                deduped.push(assignment.clone());
            }
        }
    }
    deduped
}

fn unique_person_ids(assignments: &[ImportAssignment]) -> Vec<PersonId> {
    let mut seen = HashSet::new();
    assignments
        .iter()
        .map(|a| a.person_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Files keyed by basename. When two keys reduce to the same basename the
/// lexicographically smallest original key wins.
fn index_files(files: &HashMap<String, UploadedFile>) -> HashMap<&str, &UploadedFile> {
    let mut keys: Vec<&String> = files.keys().collect();
    keys.sort();

    let mut index: HashMap<&str, &UploadedFile> = HashMap::with_capacity(keys.len());
    for key in keys {
        let name = basename(key);
        if name.is_empty() {
            log::warn!("Ignoring uploaded file with unusable name '{}'", key);
            continue;
        }
        if index.contains_key(name) {
            log::warn!("Ignoring uploaded file '{}': '{}' is already provided", key, name);
            continue;
        }
        index.insert(name, &files[key]);
    }
    index
}

#[cfg(test)]
#[path = "tests/executor_tests.rs"]
mod tests;
