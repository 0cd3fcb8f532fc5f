use std::sync::Arc;

use async_trait::async_trait;
use edu_core::store::{KeyValueStore, StoreConfig, StoreError, StoreFactory};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::repository::SqliteKeyValueStore;

const IN_MEMORY: &str = ":memory:";

/// Turns a connection string into a sqlx URL.
///
/// * `":memory:"` → `sqlite::memory:`
/// * `sqlite:` URLs are passed through unchanged
/// * anything else is a file path, created if missing
fn database_url(connection_string: &str) -> Result<String, StoreError> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Configuration(
            "sqlite backend needs a connection_string (file path or ':memory:')".to_string(),
        ));
    }
    if trimmed == IN_MEMORY {
        return Ok("sqlite::memory:".to_string());
    }
    if trimmed.starts_with("sqlite:") {
        return Ok(trimmed.to_string());
    }
    Ok(format!("sqlite:{}?mode=rwc", trimmed))
}

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`edu_core::store::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use edu_core::store::StoreRegistry;
/// use edu_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and run
    /// migrations.
    ///
    /// An in-memory database lives in a single pooled connection that is
    /// never recycled, otherwise each new connection would see an empty
    /// database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        let url = database_url(&config.connection_string)?;

        let store = if url == "sqlite::memory:" {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&url)
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            SqliteKeyValueStore::new_with_pool(pool).await
        } else {
            SqliteKeyValueStore::new(&url)
                .await
                .map_err(|e| StoreError::Connection(format!("{e:#}")))?
        };

        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Storage(format!("{e:#}")))?;

        info!(url = %url, "sqlite store ready");
        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(connection_string: &str) -> StoreConfig {
        StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: connection_string.to_string(),
        }
    }

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[test]
    fn database_url_mapping() {
        assert_eq!(database_url(":memory:").unwrap(), "sqlite::memory:");
        assert_eq!(database_url("edu.db").unwrap(), "sqlite:edu.db?mode=rwc");
        assert_eq!(
            database_url("sqlite:data/edu.db").unwrap(),
            "sqlite:data/edu.db"
        );
    }

    #[test]
    fn empty_connection_string_is_configuration_error() {
        assert!(matches!(
            database_url("  "),
            Err(StoreError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let store = match SqliteStoreFactory.create(&config(":memory:")).await {
            Ok(store) => store,
            Err(e) => panic!("failed to create in-memory store: {e:#?}"),
        };

        store.set("user", "{}").await.unwrap();
        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("{}"));
    }
}
