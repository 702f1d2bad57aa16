//! Typed JSON access to the persisted records.
//!
//! Reads return `Ok(None)` when the key is absent and
//! [`StoreError::Malformed`] when a value is present but does not decode.
//! Choosing a fallback for malformed data is left to the caller.

use crate::errors::{StoreError, StoreResult};
use crate::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the signed-in user.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Key holding the ordered sequence of authored pages.
pub const SITE_PAGES_KEY: &str = "site_pages";

pub async fn read_json<S, T>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            key: key.to_string(),
            source,
        })
}

pub async fn write_json<S, T>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}

pub async fn remove_record<S: KeyValueStore>(store: &S, key: &str) -> StoreResult<()> {
    store.remove(key).await
}
