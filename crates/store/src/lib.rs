//! Sitegate Store Crate
//!
//! Local string-keyed persistence for the two records the site keeps between
//! runs: the signed-in user (`current_user`) and the authored pages
//! (`site_pages`). Values are opaque strings at this layer; the typed JSON
//! helpers in [`records`] sit on top.

pub mod connection;
pub mod errors;
pub mod memory;
pub mod migrations;
pub mod records;
pub mod sqlite;

pub use connection::prepare_database;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use migrations::run_migrations;
pub use records::{read_json, remove_record, write_json, CURRENT_USER_KEY, SITE_PAGES_KEY};
pub use sqlite::SqliteStore;

use sitegate_config::StoreConfig;

/// A local string-keyed store, the desktop counterpart of browser local storage.
///
/// Every operation completes before it returns; callers rely on a write being
/// visible to the next read.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Fetch the raw value stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Open the SQLite-backed store described by `config` and apply migrations.
pub async fn open_store(config: &StoreConfig) -> StoreResult<SqliteStore> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| StoreError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("{e:#}")))?;

    Ok(SqliteStore::new(pool))
}
