use serde::Serialize;
use thiserror::Error;

/// Whole-operation errors surfaced to callers of the intake core.
///
/// Per-item import problems never reach this type; they are recorded as
/// `ImportOutcome`s instead.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Roster unavailable: {0}")]
    RosterUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for IntakeError {
    fn from(error: sqlx::Error) -> Self {
        IntakeError::Database(error.to_string())
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(error: std::io::Error) -> Self {
        IntakeError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(error: serde_json::Error) -> Self {
        IntakeError::Internal(error.to_string())
    }
}

impl Serialize for IntakeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Failure raised by an archive store while creating a photo.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Invalid file: {0}")]
    InvalidFile(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Person {0} does not exist")]
    PersonNotFound(i64),
}

impl From<sqlx::Error> for ArchiveError {
    fn from(error: sqlx::Error) -> Self {
        ArchiveError::Database(error.to_string())
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(error: std::io::Error) -> Self {
        ArchiveError::Storage(error.to_string())
    }
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
