use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use edu_core::{KeyValueStore, StoreError};
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

/// Key-value store persisted in the `kv_store` table.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When `key` was last written, if it exists.
    pub async fn updated_at(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let row = sqlx::query("SELECT updated_at FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(|row| {
            row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| StoreError::Storage(format!("Failed to get updated_at: {}", e)))
        })
        .transpose()
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StoreError::Storage(e.to_string()))
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        debug!(key, "stored value");
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }
}
