//! Session-wide user profile backed by a [`KeyValueStore`].
//!
//! The profile is read from the store on first access and cached; after
//! that the cache is authoritative until the next [`ProfileStore::save_profile`],
//! which overwrites both the cache and the persisted record.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::repository::{KeyValueStore, StoreError};
use crate::error::ErrorClass;
use crate::models::UserProfile;

/// Fixed key the profile is persisted under.
pub const PROFILE_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum ProfileError {
    /// The persisted record is not a readable profile.
    #[error("stored profile is unreadable: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("profile could not be serialized: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProfileError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ProfileError::Deserialization(_) => ErrorClass::Deserialization,
            ProfileError::Serialization(_) | ProfileError::Store(_) => ErrorClass::Data,
        }
    }
}

/// Lazily loaded, explicitly saved profile for the current session.
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
    cached: Option<UserProfile>,
    loaded: bool,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cached: None,
            loaded: false,
        }
    }

    /// The profile if it has been loaded or saved, without touching storage.
    pub fn current(&self) -> Option<&UserProfile> {
        self.cached.as_ref()
    }

    /// Returns the profile, reading it from storage on first call.
    ///
    /// # Errors
    ///
    /// * [`ProfileError::Deserialization`] if the stored record is malformed.
    ///   Nothing is cached, so a later call reads storage again.
    /// * [`ProfileError::Store`] if the backend fails.
    pub async fn load_profile(&mut self) -> Result<Option<UserProfile>, ProfileError> {
        if !self.loaded {
            self.cached = self.read().await?;
            self.loaded = true;
        }
        Ok(self.cached.clone())
    }

    /// Discards the cache and reads storage again.
    pub async fn reload(&mut self) -> Result<Option<UserProfile>, ProfileError> {
        self.loaded = false;
        self.cached = None;
        self.load_profile().await
    }

    /// Replaces the profile and persists it, overwriting every field.
    pub async fn save_profile(
        &mut self,
        profile: UserProfile,
    ) -> Result<(), ProfileError> {
        let json = serde_json::to_string(&profile).map_err(ProfileError::Serialization)?;
        self.store.set(PROFILE_KEY, &json).await?;
        info!(username = %profile.username, "profile saved");
        self.cached = Some(profile);
        self.loaded = true;
        Ok(())
    }

    /// Removes the persisted profile. The session then has no profile.
    pub async fn clear(&mut self) -> Result<(), ProfileError> {
        self.store.remove(PROFILE_KEY).await?;
        self.cached = None;
        self.loaded = true;
        Ok(())
    }

    async fn read(&self) -> Result<Option<UserProfile>, ProfileError> {
        let Some(raw) = self.store.get(PROFILE_KEY).await? else {
            debug!("no stored profile");
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            warn!(error = %e, "stored profile is unreadable");
            ProfileError::Deserialization(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemoryStore;

    fn sample_profile() -> UserProfile {
        UserProfile {
            username: "김학생".to_string(),
            profile_name: "학생".to_string(),
            profile_color: "#4A90E2".to_string(),
            high_school: "한국고".to_string(),
            grade: "2".to_string(),
            score: "3".to_string(),
            dream: "의사".to_string(),
        }
    }

    #[tokio::test]
    async fn load_without_record_is_none() {
        let mut profiles = ProfileStore::new(Arc::new(MemoryStore::new()));

        assert_eq!(profiles.load_profile().await.unwrap(), None);
        assert!(profiles.current().is_none());
    }

    #[tokio::test]
    async fn save_then_load_returns_equal_record() {
        let mut profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
        profiles.save_profile(sample_profile()).await.unwrap();

        assert_eq!(profiles.load_profile().await.unwrap(), Some(sample_profile()));
    }

    #[tokio::test]
    async fn save_is_visible_to_a_fresh_store_on_same_backend() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut writer = ProfileStore::new(backend.clone());
        writer.save_profile(sample_profile()).await.unwrap();

        let mut reader = ProfileStore::new(backend);

        assert_eq!(reader.load_profile().await.unwrap(), Some(sample_profile()));
    }

    #[tokio::test]
    async fn save_overwrites_every_field() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut profiles = ProfileStore::new(backend.clone());
        profiles.save_profile(sample_profile()).await.unwrap();

        let replacement = UserProfile {
            username: "이학생".to_string(),
            ..UserProfile::default()
        };
        profiles.save_profile(replacement.clone()).await.unwrap();

        assert_eq!(profiles.reload().await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn malformed_record_is_a_deserialization_error() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        backend.set(PROFILE_KEY, "{not json").await.unwrap();
        let mut profiles = ProfileStore::new(backend);

        let err = profiles.load_profile().await.unwrap_err();

        assert!(matches!(err, ProfileError::Deserialization(_)));
        assert_eq!(err.class(), ErrorClass::Deserialization);
        assert!(profiles.current().is_none());
    }

    #[tokio::test]
    async fn malformed_record_can_be_replaced_by_save() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        backend.set(PROFILE_KEY, "[]").await.unwrap();
        let mut profiles = ProfileStore::new(backend);
        assert!(profiles.load_profile().await.is_err());

        profiles.save_profile(sample_profile()).await.unwrap();

        assert_eq!(profiles.reload().await.unwrap(), Some(sample_profile()));
    }

    #[tokio::test]
    async fn first_load_is_cached() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut profiles = ProfileStore::new(backend.clone());
        assert_eq!(profiles.load_profile().await.unwrap(), None);

        // Written behind the store's back; not observed until reload.
        let json = serde_json::to_string(&sample_profile()).unwrap();
        backend.set(PROFILE_KEY, &json).await.unwrap();

        assert_eq!(profiles.load_profile().await.unwrap(), None);
        assert_eq!(profiles.reload().await.unwrap(), Some(sample_profile()));
    }

    #[tokio::test]
    async fn clear_removes_record() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut profiles = ProfileStore::new(backend.clone());
        profiles.save_profile(sample_profile()).await.unwrap();

        profiles.clear().await.unwrap();

        assert_eq!(backend.get(PROFILE_KEY).await.unwrap(), None);
        assert!(profiles.current().is_none());
    }
}
