//! Roster snapshots and the batch lookup used by the importer.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::{models::PersonRow, roster_repo};
use crate::types::errors::{IntakeError, IntakeResult};

pub type PersonId = i64;

/// Immutable snapshot of one roster member, taken when an operation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PersonId,
    /// Authoritative spelling of the person's name as kept by the roster.
    pub name: String,
}

impl RosterEntry {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<PersonRow> for RosterEntry {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Batch roster lookup.
///
/// Implementations must omit unknown ids rather than fail; an `Err` means the
/// lookup itself could not run.
#[allow(async_fn_in_trait)]
pub trait RosterLookup {
    async fn load_roster(&self, ids: &[PersonId]) -> IntakeResult<HashMap<PersonId, RosterEntry>>;
}

impl<T: RosterLookup + ?Sized> RosterLookup for &T {
    async fn load_roster(&self, ids: &[PersonId]) -> IntakeResult<HashMap<PersonId, RosterEntry>> {
        (**self).load_roster(ids).await
    }
}

/// In-memory roster, for callers that already hold the snapshot.
impl RosterLookup for [RosterEntry] {
    async fn load_roster(&self, ids: &[PersonId]) -> IntakeResult<HashMap<PersonId, RosterEntry>> {
        Ok(self
            .iter()
            .filter(|entry| ids.contains(&entry.id))
            .map(|entry| (entry.id, entry.clone()))
            .collect())
    }
}

impl RosterLookup for Vec<RosterEntry> {
    async fn load_roster(&self, ids: &[PersonId]) -> IntakeResult<HashMap<PersonId, RosterEntry>> {
        self.as_slice().load_roster(ids).await
    }
}

/// SQLite-backed roster over the `persons` table.
#[derive(Clone)]
pub struct SqliteRoster {
    pool: SqlitePool,
}

impl SqliteRoster {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whole roster of one unit, in the order the matcher should see it.
    pub async fn unit_roster(&self, unit_id: &str) -> IntakeResult<Vec<RosterEntry>> {
        let rows = roster_repo::get_roster_for_unit(&self.pool, unit_id).await?;
        Ok(rows.into_iter().map(RosterEntry::from).collect())
    }
}

impl RosterLookup for SqliteRoster {
    async fn load_roster(&self, ids: &[PersonId]) -> IntakeResult<HashMap<PersonId, RosterEntry>> {
        let rows = roster_repo::get_persons_by_ids(&self.pool, ids)
            .await
            .map_err(|e| IntakeError::RosterUnavailable(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, RosterEntry::from(row)))
            .collect())
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
