//! Comparison keys for roster names and uploaded filenames.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

use crate::services::fs_utils::path_utils::{basename, split_extension};

/// Separators people use in place of spaces when naming files.
static RE_FILENAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-.+]+").expect("Invalid regex"));

/// Canonical comparison key for a display name.
///
/// Pipeline:
/// 1. Trim
/// 2. Fold accents and other non-Latin characters to ASCII via deunicode
/// 3. Lowercase
/// 4. Collapse whitespace runs to a single space
///
/// Total and idempotent; whitespace-only input yields an empty key.
pub fn canonicalize(raw: &str) -> String {
    let latin = deunicode(raw.trim());
    latin
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical key for an uploaded filename.
///
/// Drops any directory part and the extension, treats `_ - . +` as spaces,
/// canonicalizes, then removes purely numeric tokens (camera counters,
/// sequence suffixes like `_02`).
pub fn filename_key(filename: &str) -> String {
    let (stem, _ext) = split_extension(basename(filename));
    let spaced = RE_FILENAME_SEPARATORS.replace_all(stem, " ");
    canonicalize(&spaced)
        .split(' ')
        .filter(|token| !token.is_empty() && !token.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
