use std::sync::Arc;

use anyhow::{Context, Result};
use edu_core::store::{KeyValueStore, MemoryStoreFactory, StoreRegistry};
use edu_core::{ErrorClass, ProfileStore, UserProfile};
use edu_data::Catalog;
use edu_store_sqlite::SqliteStoreFactory;
use tracing::{debug, warn};

use crate::config::AppConfig;

/// Every backend this binary can open.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// What every page of a session reads from: the catalog and the profile
/// store.
pub struct Session {
    pub catalog: Catalog,
    pub profiles: ProfileStore,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            catalog,
            profiles: ProfileStore::new(store),
        }
    }

    /// Opens the configured store and the bundled catalog.
    pub async fn open(config: &AppConfig) -> Result<Self> {
        debug!("connecting to {} backend", config.store.backend);
        let store = build_registry()
            .create(&config.store)
            .await
            .with_context(|| format!("Failed to open '{}' store", config.store.backend))?;
        let catalog = Catalog::bundled().context("Failed to load bundled catalog")?;
        Ok(Self::new(catalog, store))
    }

    /// The stored profile, with an unreadable record treated as absent.
    ///
    /// Backend failures are returned, so callers never mistake a failed
    /// read for an empty profile and overwrite the stored record.
    pub async fn readable_profile(&mut self) -> Result<Option<UserProfile>> {
        match self.profiles.load_profile().await {
            Ok(profile) => Ok(profile),
            Err(e) if e.class() == ErrorClass::Deserialization => {
                warn!(error = %e, "ignoring unreadable stored profile");
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to read stored profile"),
        }
    }
}
