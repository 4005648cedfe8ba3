use std::sync::Arc;

use tracing::warn;

use k53_core::model::Preferences;
use storage::repository::PreferencesRepository;

use crate::error::PreferencesError;

/// Loads and toggles the persisted user preferences.
///
/// A missing or unreadable record always resolves to `Preferences::default()`
/// (everything enabled); corruption never blocks the app.
#[derive(Clone)]
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        Self { repo }
    }

    /// The current preferences, falling back to defaults.
    pub async fn current(&self) -> Preferences {
        match self.repo.get_preferences().await {
            Ok(Some(preferences)) => preferences,
            Ok(None) => Preferences::default(),
            Err(err) => {
                warn!(%err, "preferences unreadable, using defaults");
                Preferences::default()
            }
        }
    }

    /// Flip the sound-effects flag and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` if the save fails.
    pub async fn toggle_sound(&self) -> Result<Preferences, PreferencesError> {
        let updated = self.current().await.with_sound_toggled();
        self.repo.save_preferences(&updated).await?;
        Ok(updated)
    }

    /// Flip the communications flag and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` if the save fails.
    pub async fn toggle_communication(&self) -> Result<Preferences, PreferencesError> {
        let updated = self.current().await.with_communication_toggled();
        self.repo.save_preferences(&updated).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn missing_record_yields_defaults() {
        let service = PreferencesService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.current().await, Preferences::default());
    }

    #[tokio::test]
    async fn toggles_persist_and_stay_independent() {
        let service = PreferencesService::new(Arc::new(InMemoryRepository::new()));

        let after_sound = service.toggle_sound().await.unwrap();
        assert!(!after_sound.sound_enabled);
        assert!(after_sound.communication_enabled);

        let after_comm = service.toggle_communication().await.unwrap();
        assert!(!after_comm.sound_enabled);
        assert!(!after_comm.communication_enabled);

        // a fresh read sees the persisted state
        assert_eq!(service.current().await, after_comm);
    }
}
