use serde::{Deserialize, Serialize};

use crate::types::errors::{IntakeError, IntakeResult};

/// Score cut-offs for the filename matcher.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Minimum top score for a non-exact automatic match.
    pub accept: f64,
    /// Required lead of the top score over the runner-up for a `High` match.
    pub margin: f64,
    /// Minimum score for a roster name to be listed as a candidate at all.
    pub min_candidate: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            accept: 0.85,
            margin: 0.15,
            min_candidate: 0.5,
        }
    }
}

impl MatchThresholds {
    pub fn validate(&self) -> IntakeResult<()> {
        for (name, value) in [
            ("accept", self.accept),
            ("margin", self.margin),
            ("min_candidate", self.min_candidate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(IntakeError::InvalidConfig(format!(
                    "threshold '{name}' must be within [0, 1], got {value}"
                )));
            }
        }
        if self.min_candidate > self.accept {
            return Err(IntakeError::InvalidConfig(format!(
                "min_candidate ({}) cannot exceed accept ({})",
                self.min_candidate, self.accept
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImportSettings {
    /// Uploads in flight at once during a bulk import. `1` means strictly sequential.
    pub max_parallel_uploads: usize,
    /// Lowercase file extensions the archive accepts.
    pub allowed_extensions: Vec<String>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_parallel_uploads: 1,
            allowed_extensions: vec!["jpg".into(), "jpeg".into(), "png".into(), "webp".into()],
        }
    }
}

impl ImportSettings {
    pub fn validate(&self) -> IntakeResult<()> {
        if self.max_parallel_uploads == 0 {
            return Err(IntakeError::InvalidConfig(
                "max_parallel_uploads must be at least 1".into(),
            ));
        }
        if self.allowed_extensions.is_empty() {
            return Err(IntakeError::InvalidConfig(
                "allowed_extensions cannot be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IntakeSettings {
    pub thresholds: MatchThresholds,
    pub import: ImportSettings,
}

impl IntakeSettings {
    pub fn validate(&self) -> IntakeResult<()> {
        self.thresholds.validate()?;
        self.import.validate()
    }
}
