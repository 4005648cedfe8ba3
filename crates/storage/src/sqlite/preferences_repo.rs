use async_trait::async_trait;
use sqlx::Row;

use k53_core::model::Preferences;

use crate::repository::{PreferencesRepository, StorageError};

use super::SqliteRepository;
use super::mapping::ser;

#[async_trait]
impl PreferencesRepository for SqliteRepository {
    async fn get_preferences(&self) -> Result<Option<Preferences>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT sound_enabled, communication_enabled
            FROM app_preferences
            WHERE id = 1
            ",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let sound_enabled: i64 = row.try_get("sound_enabled").map_err(ser)?;
        let communication_enabled: i64 = row.try_get("communication_enabled").map_err(ser)?;

        Ok(Some(Preferences {
            sound_enabled: sound_enabled != 0,
            communication_enabled: communication_enabled != 0,
        }))
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_preferences (id, sound_enabled, communication_enabled)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                sound_enabled = excluded.sound_enabled,
                communication_enabled = excluded.communication_enabled
            ",
        )
        .bind(1_i64)
        .bind(i64::from(preferences.sound_enabled))
        .bind(i64::from(preferences.communication_enabled))
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
