//! SQLite-backed key-value store.

use crate::errors::StoreResult;
use crate::KeyValueStore;
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Key-value records kept in the `kv_records` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the underlying pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO kv_records (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key, bytes = value.len(), "stored record");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM kv_records WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key, removed = result.rows_affected(), "removed record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::open_store;
    use sitegate_config::StoreConfig;
    use tempfile::TempDir;

    async fn store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            url: format!("sqlite://{}", temp_dir.path().join("kv.db").display()),
            max_connections: 1,
        };
        (open_store(&config).await.unwrap(), temp_dir)
    }

    #[tokio::test]
    async fn test_get_set_remove() {
        let (store, _temp_dir) = store().await;
        assert!(store.get("current_user").await.unwrap().is_none());

        store.set("current_user", r#"{"id":"1"}"#).await.unwrap();
        assert_eq!(
            store.get("current_user").await.unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );

        store.remove("current_user").await.unwrap();
        assert!(store.get("current_user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_stamps_updated_at() {
        let (store, _temp_dir) = store().await;
        store.set("site_pages", "[]").await.unwrap();

        let updated_at: String =
            sqlx::query_scalar("SELECT updated_at FROM kv_records WHERE key = 'site_pages'")
                .fetch_one(store.pool())
                .await
                .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&updated_at).is_ok());
    }
}
