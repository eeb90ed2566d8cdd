//! Name similarity used to rank roster candidates for a filename.
//!
//! Score is `max(token_sort_ratio, token_dice)`:
//! - `token_sort_ratio`: normalized Levenshtein over the alphabetically sorted
//!   tokens, so "Last First" and "First Last" compare equal while typos still
//!   earn partial credit.
//! - `token_dice`: Dice coefficient over the token sets, which rewards names
//!   that share whole words even when one side has extra given names.
//!
//! Only identical keys score `1.0`; everything else is capped below it so the
//! exact tier stays reserved for true canonical equality.

use std::collections::BTreeSet;

/// Highest score a non-identical pair can reach.
pub const NEAR_EXACT_CAP: f64 = 0.99;

/// Similarity of two canonical keys in `[0, 1]`. Symmetric and deterministic.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let tokens_a = tokens(a);
    let tokens_b = tokens(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sorted_a = sorted_join(&tokens_a);
    let sorted_b = sorted_join(&tokens_b);
    let sort_ratio = strsim::normalized_levenshtein(&sorted_a, &sorted_b);

    let score = sort_ratio.max(token_dice(&tokens_a, &tokens_b));
    score.clamp(0.0, NEAR_EXACT_CAP)
}

/// Alphanumeric tokens of a canonical key. Punctuation inside names
/// (`o'brien`, `anna-maria`) splits tokens the same way on both sides.
pub(crate) fn tokens(key: &str) -> Vec<&str> {
    key.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

fn sorted_join(tokens: &[&str]) -> String {
    let mut sorted = tokens.to_vec();
    sorted.sort_unstable();
    sorted.join(" ")
}

fn token_dice(a: &[&str], b: &[&str]) -> f64 {
    let set_a: BTreeSet<&str> = a.iter().copied().collect();
    let set_b: BTreeSet<&str> = b.iter().copied().collect();
    let shared = set_a.intersection(&set_b).count() as f64;
    (2.0 * shared) / (set_a.len() + set_b.len()) as f64
}

#[cfg(test)]
#[path = "tests/scoring_tests.rs"]
mod tests;
