//! Cache-first price loading
//!
//! Composes the HTTP client and the disk cache behind one call that always
//! yields a `PriceIndex`. Fetch failure degrades to an empty index (every
//! cell renders no-data); it is never surfaced as an error.

use crate::services::{PriceCacheService, PriceClient};
use crate::types::PriceIndex;

/// Loads (symbol, year) price data, cache first
pub struct PriceLoader {
    client: Option<PriceClient>,
    cache: Option<PriceCacheService>,
}

impl PriceLoader {
    /// Create a loader with the default client and cache.
    /// Either collaborator failing to construct just disables it.
    pub fn new() -> Self {
        Self {
            client: PriceClient::new().ok(),
            cache: PriceCacheService::new().ok(),
        }
    }

    /// Loader with explicit collaborators (for testing)
    pub fn with_parts(client: Option<PriceClient>, cache: Option<PriceCacheService>) -> Self {
        Self { client, cache }
    }

    /// Load one (symbol, year) into an index.
    ///
    /// Cache hit wins; otherwise fetch and cache the result. Empty fetch
    /// results are not cached so a down backend is retried next time.
    pub fn load(&self, symbol: &str, year: i32) -> PriceIndex {
        if let Some(cache) = &self.cache {
            if let Some(rows) = cache.load(symbol, year) {
                return PriceIndex::from_rows(rows);
            }
        }

        let rows = match &self.client {
            Some(client) => client.fetch_year(symbol, year),
            None => Vec::new(),
        };

        if !rows.is_empty() {
            if let Some(cache) = &self.cache {
                let _ = cache.store(symbol, year, &rows);
            }
        }

        PriceIndex::from_rows(rows)
    }
}

impl Default for PriceLoader {
    fn default() -> Self {
        Self::new()
    }
}
