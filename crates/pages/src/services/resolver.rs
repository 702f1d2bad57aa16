//! Slug resolution over the stored page list.

use crate::entities::DynamicPage;
use serde_json::Value;
use sitegate_store::{read_json, write_json, KeyValueStore, StoreError, StoreResult, SITE_PAGES_KEY};
use tracing::{debug, warn};

/// Outcome of looking a slug up.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup {
    Found(DynamicPage),
    NotFound,
}

impl PageLookup {
    pub fn page(&self) -> Option<&DynamicPage> {
        match self {
            PageLookup::Found(page) => Some(page),
            PageLookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PageLookup::Found(_))
    }
}

/// Read the stored pages in order.
///
/// A missing or undecodable `site_pages` record is an empty list. Entries
/// without a string `slug` can never be addressed and are skipped; every
/// other entry is kept in order, however incomplete.
pub async fn load_pages<S: KeyValueStore>(store: &S) -> StoreResult<Vec<DynamicPage>> {
    let entries = match read_json::<_, Vec<Value>>(store, SITE_PAGES_KEY).await {
        Ok(entries) => entries.unwrap_or_default(),
        Err(StoreError::Malformed { source, .. }) => {
            warn!(error = %source, "ignoring malformed page list");
            return Ok(Vec::new());
        }
        Err(other) => return Err(other),
    };

    let pages = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(page) => Some(page),
            Err(error) => {
                warn!(index, %error, "skipping page entry without a slug");
                None
            }
        })
        .collect();

    Ok(pages)
}

/// Replace the stored page list. This is the write the admin screens perform.
pub async fn save_pages<S: KeyValueStore>(store: &S, pages: &[DynamicPage]) -> StoreResult<()> {
    write_json(store, SITE_PAGES_KEY, pages).await
}

/// Resolves `/page/:slug` requests against the current store contents.
///
/// Nothing is cached: every call reads the store, so pages written since the
/// last lookup are visible immediately.
#[derive(Clone)]
pub struct PageResolver<S> {
    store: S,
}

impl<S: KeyValueStore> PageResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// First page whose slug equals `slug` exactly, in stored order.
    pub async fn resolve(&self, slug: &str) -> StoreResult<PageLookup> {
        let pages = load_pages(&self.store).await?;
        let lookup = pages
            .into_iter()
            .find(|page| page.slug == slug)
            .map_or(PageLookup::NotFound, PageLookup::Found);

        debug!(slug, found = lookup.is_found(), "resolved page slug");
        Ok(lookup)
    }
}
