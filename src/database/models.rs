use serde::{Deserialize, Serialize};

/// A roster member as stored in the `persons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonRow {
    pub id: i64,
    pub unit_id: String,
    pub name: String,
}

/// A stored archive photo.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArchivePhotoRow {
    pub id: i64,
    pub person_id: i64,
    pub year: i32,
    pub file_path: String,
    pub original_name: String,
    pub content_hash: String,
    pub is_active: bool,
    pub created_at: Option<String>,
}

/// Insert payload for `archive_photos`. New rows always start inactive;
/// activation goes through `photo_repo::activate_if_none` or
/// `photo_repo::set_active_photo`.
#[derive(Debug, Clone)]
pub struct NewArchivePhoto {
    pub person_id: i64,
    pub year: i32,
    pub file_path: String,
    pub original_name: String,
    pub content_hash: String,
}
