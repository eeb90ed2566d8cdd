//! Baseline matcher behavior over a realistic class roster.
//!
//! Fixture covers the shapes that show up in real uploads:
//! 1. Exact names in several spellings (case, accents, separators, counters)
//! 2. Reversed name order
//! 3. Typos
//! 4. Names contained in longer roster names
//! 5. Files that belong to nobody

use photo_intake_lib::services::matcher::{
    match_filenames, MatchConfidence, MatchResult, OrphanReason, UncertainReason,
};
use photo_intake_lib::{AssignmentPlan, MatchThresholds, RosterEntry};

fn class_roster() -> Vec<RosterEntry> {
    [
        "Kovács Anna",
        "Kovács Anna Mária",
        "Szabó Levente",
        "Nagy Péter",
        "Tóth Eszter",
        "Varga Bence",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| RosterEntry::new(i as i64 + 1, *name))
    .collect()
}

fn uploads() -> Vec<String> {
    [
        "KOVACS_ANNA.JPG",
        "szabo-levente_002.jpg",
        "peter.nagy.png",
        "toth_esztr.jpg",
        "kovacs_anna_m.jpg",
        "IMG_4411.jpg",
        "random_kid.jpg",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn run() -> MatchResult {
    match_filenames(&class_roster(), &uploads(), &MatchThresholds::default())
}

#[test]
fn test_baseline_partition() {
    let result = run();

    assert_eq!(result.total_count(), uploads().len());
    assert_eq!(result.match_count(), 3);
    assert_eq!(result.uncertain_count(), 2);
    assert_eq!(result.orphan_count(), 2);
}

#[test]
fn test_baseline_matches() {
    let result = run();
    let resolved: Vec<(&str, i64, MatchConfidence)> = result
        .matches()
        .iter()
        .map(|m| (m.filename.as_str(), m.person_id, m.confidence))
        .collect();

    assert_eq!(
        resolved,
        vec![
            ("szabo-levente_002.jpg", 3, MatchConfidence::Exact),
            ("peter.nagy.png", 4, MatchConfidence::High),
            ("toth_esztr.jpg", 5, MatchConfidence::High),
        ]
    );
}

#[test]
fn test_baseline_review_queue() {
    let result = run();

    // An exact name is still ambiguous while a longer roster name contains it.
    let queued = ["KOVACS_ANNA.JPG", "kovacs_anna_m.jpg"];
    for (uncertain, filename) in result.uncertain().iter().zip(queued) {
        assert_eq!(uncertain.filename, filename);
        assert_eq!(uncertain.reason, UncertainReason::MultipleCandidates);
        assert_eq!(
            uncertain.candidate_names(),
            vec!["Kovács Anna", "Kovács Anna Mária"]
        );
    }

    let orphans: Vec<(&str, Option<OrphanReason>)> = result
        .orphans()
        .iter()
        .map(|o| (o.filename.as_str(), o.reason))
        .collect();
    assert_eq!(
        orphans,
        vec![
            ("IMG_4411.jpg", Some(OrphanReason::BelowThreshold)),
            ("random_kid.jpg", Some(OrphanReason::BelowThreshold)),
        ]
    );
}

#[test]
fn test_baseline_unmatched_names_and_summary() {
    let result = run();

    assert_eq!(
        result.unmatched_names(),
        [
            "Kovács Anna".to_string(),
            "Kovács Anna Mária".to_string(),
            "Varga Bence".to_string()
        ]
    );
    assert_eq!(
        result.summary(),
        "3 files matched, 2 files need review, 2 files without a roster match, 3 roster names without a photo"
    );
}

#[test]
fn test_baseline_review_flow() {
    let result = run();
    let mut plan = AssignmentPlan::from_matches(&result, true);
    assert_eq!(plan.len(), 3);

    plan.resolve("KOVACS_ANNA.JPG", 1);
    plan.resolve("kovacs_anna_m.jpg", 2);
    assert_eq!(plan.pending_review(&result), vec!["IMG_4411.jpg", "random_kid.jpg"]);
}
