pub mod models;

pub use models::*;

use crate::database::settings_repo;
use crate::types::errors::IntakeResult;
use sqlx::SqlitePool;
use std::sync::Mutex;

/// Key under which the serialized `IntakeSettings` live in `app_settings`.
pub const SETTINGS_KEY: &str = "intake_settings";

pub struct ConfigService {
    pool: SqlitePool,
    settings: Mutex<IntakeSettings>,
}

impl ConfigService {
    /// Load settings from the database. Missing, unreadable or invalid stored
    /// settings fall back to defaults.
    pub async fn load(pool: SqlitePool) -> Self {
        let settings = Self::load_from_db(&pool).await;
        Self {
            pool,
            settings: Mutex::new(settings),
        }
    }

    async fn load_from_db(pool: &SqlitePool) -> IntakeSettings {
        let raw = match settings_repo::get_setting(pool, SETTINGS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return IntakeSettings::default(),
            Err(e) => {
                log::error!("Failed to load intake settings from DB: {e}");
                return IntakeSettings::default();
            }
        };

        let parsed: IntakeSettings = match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Stored intake settings are unreadable, using defaults: {e}");
                return IntakeSettings::default();
            }
        };

        if let Err(e) = parsed.validate() {
            log::error!("Stored intake settings are invalid, using defaults: {e}");
            return IntakeSettings::default();
        }
        parsed
    }

    pub fn get_settings(&self) -> IntakeSettings {
        self.settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .thresholds
    }

    /// Validate, persist, then swap the in-memory copy.
    pub async fn save_settings(&self, new_settings: IntakeSettings) -> IntakeResult<()> {
        new_settings.validate()?;

        let raw = serde_json::to_string(&new_settings)?;
        settings_repo::set_setting(&self.pool, SETTINGS_KEY, &raw).await?;

        *self
            .settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_settings;
        log::info!("Intake settings updated");
        Ok(())
    }

    pub async fn set_thresholds(&self, thresholds: MatchThresholds) -> IntakeResult<()> {
        let mut settings = self.get_settings();
        settings.thresholds = thresholds;
        self.save_settings(settings).await
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
