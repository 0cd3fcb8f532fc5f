use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repository::{KeyValueStore, StoreError};

/// Backend-agnostic store configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory. `connection_string` is passed to that factory unchanged.
///
/// | backend  | connection_string examples |
/// |----------|----------------------------|
/// | `memory` | ignored                    |
/// | `sqlite` | `edu.db`, `:memory:`       |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"sqlite"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) the store. Implementations may run migrations here.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Arc<dyn KeyValueStore>, StoreError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any factory of the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] if no factory is registered for the
    ///   requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
