//! Per-person photo archive.
//!
//! `ArchiveStore` is the seam the importer talks to. `PhotoArchive` is the
//! SQLite + filesystem implementation: files land under
//! `<root>/<person_id>/<year>/<uuid>.<ext>`, rows in `archive_photos`.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::types::UploadedFile;
use crate::database::models::{ArchivePhotoRow, NewArchivePhoto};
use crate::database::photo_repo;
use crate::services::config::ImportSettings;
use crate::services::core::PersonLocks;
use crate::services::fs_utils::file_utils::{content_hash, write_new_file};
use crate::services::fs_utils::path_utils::{resolve_safe_path, split_extension};
use crate::services::roster::PersonId;
use crate::types::errors::ArchiveError;

/// What the archive reports back after storing a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePhotoRecord {
    pub id: i64,
    pub person_id: PersonId,
    pub year: i32,
    /// Path relative to the archive root.
    pub file_path: String,
    pub is_active: bool,
}

#[allow(async_fn_in_trait)]
pub trait ArchiveStore {
    /// Store `file` for `person_id`. With `set_active_if_first`, the new photo
    /// becomes active only if the person has no active photo yet.
    async fn create_archive_photo(
        &self,
        person_id: PersonId,
        file: &UploadedFile,
        year: i32,
        set_active_if_first: bool,
    ) -> Result<ArchivePhotoRecord, ArchiveError>;
}

impl<T: ArchiveStore + ?Sized> ArchiveStore for &T {
    async fn create_archive_photo(
        &self,
        person_id: PersonId,
        file: &UploadedFile,
        year: i32,
        set_active_if_first: bool,
    ) -> Result<ArchivePhotoRecord, ArchiveError> {
        (**self)
            .create_archive_photo(person_id, file, year, set_active_if_first)
            .await
    }
}

const ACCEPTED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

pub struct PhotoArchive {
    pool: SqlitePool,
    storage_root: PathBuf,
    settings: ImportSettings,
    locks: PersonLocks,
}

impl PhotoArchive {
    pub fn new(pool: SqlitePool, storage_root: impl Into<PathBuf>, settings: &ImportSettings) -> Self {
        Self {
            pool,
            storage_root: storage_root.into(),
            settings: settings.clone(),
            locks: PersonLocks::new(),
        }
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// Activate `photo_id` if `person_id` has no active photo. Serialized per
    /// person; returns whether this call did the activation.
    pub async fn activate_if_none(
        &self,
        person_id: PersonId,
        photo_id: i64,
    ) -> Result<bool, ArchiveError> {
        let _guard = self.locks.lock(person_id).await;
        Ok(photo_repo::activate_if_none(&self.pool, person_id, photo_id).await?)
    }

    /// Explicitly make `photo_id` the active photo, demoting the previous one.
    pub async fn set_active_photo(
        &self,
        person_id: PersonId,
        photo_id: i64,
    ) -> Result<bool, ArchiveError> {
        let _guard = self.locks.lock(person_id).await;
        Ok(photo_repo::set_active_photo(&self.pool, person_id, photo_id).await?)
    }

    pub async fn active_photo(
        &self,
        person_id: PersonId,
    ) -> Result<Option<ArchivePhotoRow>, ArchiveError> {
        Ok(photo_repo::get_active_photo(&self.pool, person_id).await?)
    }

    pub async fn photos_for(&self, person_id: PersonId) -> Result<Vec<ArchivePhotoRow>, ArchiveError> {
        Ok(photo_repo::get_photos_for_person(&self.pool, person_id).await?)
    }

    fn validate_upload(&self, file: &UploadedFile) -> Result<String, ArchiveError> {
        let (_, ext) = split_extension(&file.filename);
        let ext = ext
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| ArchiveError::InvalidFile(format!("'{}' has no extension", file.filename)))?;
        if !self.settings.allows_extension(&ext) {
            return Err(ArchiveError::InvalidFile(format!(
                "extension '.{ext}' is not accepted"
            )));
        }

        match image::guess_format(&file.bytes) {
            Ok(format) if ACCEPTED_FORMATS.contains(&format) => Ok(ext),
            Ok(format) => Err(ArchiveError::InvalidFile(format!(
                "unsupported image format {format:?}"
            ))),
            Err(_) => Err(ArchiveError::InvalidFile(format!(
                "'{}' is not a recognizable image",
                file.filename
            ))),
        }
    }

    /// Remove a photo row and its stored file after a failed upload.
    async fn discard(&self, photo_id: i64, target: &Path) {
        if let Err(e) = photo_repo::delete_photo(&self.pool, photo_id).await {
            log::warn!("Failed to remove archive row {}: {}", photo_id, e);
        }
        remove_stored_file(target);
    }
}

impl ArchiveStore for PhotoArchive {
    async fn create_archive_photo(
        &self,
        person_id: PersonId,
        file: &UploadedFile,
        year: i32,
        set_active_if_first: bool,
    ) -> Result<ArchivePhotoRecord, ArchiveError> {
        let ext = self.validate_upload(file)?;

        let relative = format!("{person_id}/{year}/{}.{ext}", Uuid::new_v4());
        let target = resolve_safe_path(&self.storage_root, &relative)?;
        write_new_file(&target, &file.bytes)?;

        let row = NewArchivePhoto {
            person_id,
            year,
            file_path: relative.clone(),
            original_name: sanitize_filename::sanitize(&file.filename),
            content_hash: content_hash(&file.bytes),
        };
        let photo_id = match photo_repo::insert_photo(&self.pool, &row).await {
            Ok(id) => id,
            Err(e) => {
                remove_stored_file(&target);
                return Err(match e {
                    sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                        ArchiveError::PersonNotFound(person_id)
                    }
                    other => other.into(),
                });
            }
        };

        let is_active = if set_active_if_first {
            match self.activate_if_none(person_id, photo_id).await {
                Ok(activated) => activated,
                Err(e) => {
                    // The photo must not outlive a failed upload.
                    self.discard(photo_id, &target).await;
                    return Err(e);
                }
            }
        } else {
            false
        };

        log::info!(
            "Archived '{}' for person {} as photo {} (active: {})",
            file.filename,
            person_id,
            photo_id,
            is_active
        );

        Ok(ArchivePhotoRecord {
            id: photo_id,
            person_id,
            year,
            file_path: relative,
            is_active,
        })
    }
}

fn remove_stored_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("Failed to remove orphaned archive file {}: {}", path.display(), e);
    }
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
