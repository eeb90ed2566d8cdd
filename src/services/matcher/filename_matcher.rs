//! Filename → roster matcher.
//!
//! **Algorithm:**
//! 1. Canonicalize every roster name once per call
//! 2. Reduce each filename to a key (basename, no extension, separators as spaces)
//! 3. Score the key against every roster key
//! 4. Classify: unique exact → `Exact`, unless a longer qualifying roster name
//!    contains the whole key; no exact, top ≥ accept with clear margin → `High`;
//!    any candidate ≥ min → uncertain; otherwise orphan
//! 5. Roster names without an `Exact`/`High` match → `unmatched_names`
//!
//! Filenames are scored in parallel; output lists keep the caller's order.

use rayon::prelude::*;
use std::collections::HashSet;

#[cfg(feature = "debug_matcher")]
use log::debug;

use super::normalizer::{canonicalize, filename_key};
use super::scoring::{similarity, tokens};
use super::types::{
    FilenameOutcome, MatchConfidence, MatchEntry, MatchResult, MediaFile, OrphanEntry,
    OrphanReason, ScoredCandidate, UncertainEntry, UncertainReason,
};
use crate::services::config::MatchThresholds;
use crate::services::roster::{PersonId, RosterEntry};

/// Roster entry with its key computed once for the whole call.
struct KeyedEntry<'a> {
    entry: &'a RosterEntry,
    key: String,
}

/// A scored pairing between one filename and one roster entry.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    person_id: PersonId,
    roster_index: usize,
    display_name: &'a str,
    score: f64,
}

/// Match plain filenames against a roster.
pub fn match_filenames(
    roster: &[RosterEntry],
    filenames: &[String],
    thresholds: &MatchThresholds,
) -> MatchResult {
    let files: Vec<MediaFile> = filenames.iter().map(MediaFile::new).collect();
    match_media(roster, &files, thresholds)
}

/// Match uploaded media against a roster, carrying media ids through.
pub fn match_media(
    roster: &[RosterEntry],
    files: &[MediaFile],
    thresholds: &MatchThresholds,
) -> MatchResult {
    let keyed: Vec<KeyedEntry<'_>> = roster
        .iter()
        .map(|entry| KeyedEntry {
            entry,
            key: canonicalize(&entry.name),
        })
        .collect();

    let classified: Vec<(FilenameOutcome, Option<usize>)> = files
        .par_iter()
        .map(|file| classify_file(file, &keyed, thresholds))
        .collect();

    let matched_indexes: HashSet<usize> = classified
        .iter()
        .filter_map(|(_, index)| *index)
        .collect();
    let unmatched_names = roster
        .iter()
        .enumerate()
        .filter(|(index, _)| !matched_indexes.contains(index))
        .map(|(_, entry)| entry.name.clone())
        .collect();

    let result = MatchResult::from_outcomes(
        classified.into_iter().map(|(outcome, _)| outcome),
        unmatched_names,
    );
    log::debug!(
        "Matched {} file(s) against {} roster name(s): {}",
        files.len(),
        roster.len(),
        result.summary()
    );
    result
}

/// Classify one file. The second element is the roster index of an accepted
/// (`Exact`/`High`) match.
fn classify_file(
    file: &MediaFile,
    roster: &[KeyedEntry<'_>],
    thresholds: &MatchThresholds,
) -> (FilenameOutcome, Option<usize>) {
    let key = filename_key(&file.filename);

    if key.is_empty() {
        return (orphan(file, None, OrphanReason::UnreadableName), None);
    }
    if roster.is_empty() {
        return (orphan(file, None, OrphanReason::EmptyRoster), None);
    }

    let candidates = rank_candidates(&key, roster);

    #[cfg(feature = "debug_matcher")]
    debug!(
        "[MATCHER] '{}' key='{}' top={:?}",
        file.filename,
        key,
        candidates
            .iter()
            .take(3)
            .map(|c| (c.display_name, c.score))
            .collect::<Vec<_>>()
    );

    // `candidates` is non-empty because the roster is.
    let best = candidates[0];
    let runner_up = candidates.get(1).map_or(0.0, |c| c.score);

    let exact: Vec<&Candidate<'_>> = candidates.iter().filter(|c| c.score >= 1.0).collect();
    match exact.as_slice() {
        [only] if !has_extended_name(&key, &candidates, roster, thresholds) => {
            return (
                matched(file, only, MatchConfidence::Exact),
                Some(only.roster_index),
            );
        }
        [] if best.score >= thresholds.accept
            && clears_margin(best.score, runner_up, thresholds.margin) =>
        {
            return (
                matched(file, &best, MatchConfidence::High),
                Some(best.roster_index),
            );
        }
        _ => {}
    }

    let qualifying: Vec<ScoredCandidate> = candidates
        .iter()
        .take_while(|c| c.score >= thresholds.min_candidate)
        .map(|c| ScoredCandidate {
            person_id: c.person_id,
            roster_name: c.display_name.to_string(),
            score: c.score,
        })
        .collect();

    if !qualifying.is_empty() {
        let reason = if qualifying.len() >= 2 {
            UncertainReason::MultipleCandidates
        } else {
            UncertainReason::LowConfidence
        };
        return (
            FilenameOutcome::Uncertain(UncertainEntry {
                filename: file.filename.clone(),
                candidates: qualifying,
                reason,
                media_id: file.media_id,
            }),
            None,
        );
    }

    let suggestion = (best.score > 0.0).then_some(best.display_name);
    (orphan(file, suggestion, OrphanReason::BelowThreshold), None)
}

/// Tolerance for threshold comparisons on derived scores.
const SCORE_EPSILON: f64 = 1e-9;

fn clears_margin(best: f64, runner_up: f64, margin: f64) -> bool {
    best - runner_up + SCORE_EPSILON >= margin
}

/// Whether another qualifying roster name contains every token of `key`
/// (e.g. "kovacs anna maria" for "kovacs anna"). Such a file is ambiguous even
/// when one roster name matches it exactly.
fn has_extended_name(
    key: &str,
    candidates: &[Candidate<'_>],
    roster: &[KeyedEntry<'_>],
    thresholds: &MatchThresholds,
) -> bool {
    candidates
        .iter()
        .filter(|c| c.score < 1.0 && c.score >= thresholds.min_candidate)
        .any(|c| {
            let longer: HashSet<&str> = tokens(&roster[c.roster_index].key).into_iter().collect();
            tokens(key).iter().all(|token| longer.contains(token))
        })
}

/// Score every roster entry and sort best first. Ties keep roster order.
fn rank_candidates<'a>(key: &str, roster: &'a [KeyedEntry<'a>]) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = roster
        .iter()
        .enumerate()
        .map(|(roster_index, keyed)| Candidate {
            person_id: keyed.entry.id,
            roster_index,
            display_name: keyed.entry.name.as_str(),
            score: similarity(key, &keyed.key),
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.roster_index.cmp(&b.roster_index))
    });
    candidates
}

fn matched(file: &MediaFile, candidate: &Candidate<'_>, confidence: MatchConfidence) -> FilenameOutcome {
    FilenameOutcome::Matched(MatchEntry {
        roster_name: candidate.display_name.to_string(),
        person_id: candidate.person_id,
        filename: file.filename.clone(),
        confidence,
        media_id: file.media_id,
    })
}

fn orphan(file: &MediaFile, suggestion: Option<&str>, reason: OrphanReason) -> FilenameOutcome {
    FilenameOutcome::Orphan(OrphanEntry {
        filename: file.filename.clone(),
        media_id: file.media_id,
        suggested_name: suggestion.map(str::to_string),
        reason: Some(reason),
    })
}

#[cfg(test)]
#[path = "tests/filename_matcher_tests.rs"]
mod tests;
