use sqlx::SqlitePool;

use super::models::{ArchivePhotoRow, NewArchivePhoto};

const PHOTO_COLUMNS: &str =
    "id, person_id, year, file_path, original_name, content_hash, is_active, created_at";

pub async fn insert_photo(pool: &SqlitePool, photo: &NewArchivePhoto) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO archive_photos (person_id, year, file_path, original_name, content_hash, is_active)
         VALUES (?, ?, ?, ?, ?, 0)",
    )
    .bind(photo.person_id)
    .bind(photo.year)
    .bind(&photo.file_path)
    .bind(&photo.original_name)
    .bind(&photo.content_hash)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_photo(pool: &SqlitePool, id: i64) -> Result<Option<ArchivePhotoRow>, sqlx::Error> {
    sqlx::query_as::<_, ArchivePhotoRow>(&format!(
        "SELECT {PHOTO_COLUMNS} FROM archive_photos WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_photos_for_person(
    pool: &SqlitePool,
    person_id: i64,
) -> Result<Vec<ArchivePhotoRow>, sqlx::Error> {
    sqlx::query_as::<_, ArchivePhotoRow>(&format!(
        "SELECT {PHOTO_COLUMNS} FROM archive_photos WHERE person_id = ? ORDER BY id"
    ))
    .bind(person_id)
    .fetch_all(pool)
    .await
}

pub async fn get_active_photo(
    pool: &SqlitePool,
    person_id: i64,
) -> Result<Option<ArchivePhotoRow>, sqlx::Error> {
    sqlx::query_as::<_, ArchivePhotoRow>(&format!(
        "SELECT {PHOTO_COLUMNS} FROM archive_photos WHERE person_id = ? AND is_active = 1"
    ))
    .bind(person_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_active_photos(pool: &SqlitePool, person_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM archive_photos WHERE person_id = ? AND is_active = 1",
    )
    .bind(person_id)
    .fetch_one(pool)
    .await
}

/// Mark `photo_id` active only when `person_id` has no active photo yet.
///
/// Single conditional UPDATE, so the check and the set cannot interleave with
/// another statement. Returns whether the photo was actually activated.
pub async fn activate_if_none(
    pool: &SqlitePool,
    person_id: i64,
    photo_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE archive_photos SET is_active = 1
         WHERE id = ? AND person_id = ?
           AND NOT EXISTS (
               SELECT 1 FROM archive_photos WHERE person_id = ? AND is_active = 1
           )",
    )
    .bind(photo_id)
    .bind(person_id)
    .bind(person_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete_photo(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM archive_photos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Make `photo_id` the active photo of `person_id`, deactivating the previous
/// one in the same transaction. Returns `false` if the photo does not belong
/// to the person.
pub async fn set_active_photo(
    pool: &SqlitePool,
    person_id: i64,
    photo_id: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let owned: Option<i64> =
        sqlx::query_scalar("SELECT id FROM archive_photos WHERE id = ? AND person_id = ?")
            .bind(photo_id)
            .bind(person_id)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("UPDATE archive_photos SET is_active = 0 WHERE person_id = ? AND is_active = 1")
        .bind(person_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE archive_photos SET is_active = 1 WHERE id = ?")
        .bind(photo_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

#[cfg(test)]
#[path = "tests/photo_repo_test.rs"]
mod tests;
