use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::models::PersonRow;

pub async fn insert_person(
    pool: &SqlitePool,
    unit_id: &str,
    name: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO persons (unit_id, name) VALUES (?, ?)")
        .bind(unit_id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Full roster of one organizational unit, ordered by name then id.
pub async fn get_roster_for_unit(
    pool: &SqlitePool,
    unit_id: &str,
) -> Result<Vec<PersonRow>, sqlx::Error> {
    sqlx::query_as::<_, PersonRow>(
        "SELECT id, unit_id, name FROM persons WHERE unit_id = ? ORDER BY name, id",
    )
    .bind(unit_id)
    .fetch_all(pool)
    .await
}

/// Batch lookup by id. Unknown ids are simply absent from the result.
pub async fn get_persons_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<PersonRow>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, unit_id, name FROM persons WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    qb.build_query_as::<PersonRow>().fetch_all(pool).await
}

#[cfg(test)]
#[path = "tests/roster_repo_test.rs"]
mod tests;
