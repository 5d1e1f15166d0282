//! # Navigator Places
//!
//! Provider Locator for the care navigator: an external geo-search
//! capability returning care-facility candidates for a query.
//!
//! Contains:
//! - `PlacesClient`: the directory HTTP client (single attempt, bounded
//!   timeout)
//! - `PlacesCache`: a read-through `(zip, keyword)` cache with a fixed TTL
//! - `static_fallback`: the pre-baked provider list used when the directory
//!   is unreachable
//! - `PlacesService`: the lookup orchestration tying the three together

pub mod cache;
pub mod client;
pub mod error;
pub mod fallback;

pub use cache::PlacesCache;
pub use client::PlacesClient;
pub use error::{PlacesError, PlacesResult};
pub use fallback::static_fallback;

use navigator_core::{NavigatorConfig, Provider};
use std::sync::Arc;

/// Provider lookup with caching and local recovery.
///
/// Failure policy: a missing API credential yields an empty list (not an
/// error); transport failure or timeout is recovered with the static
/// fallback and never surfaced to the caller as an error; only an unreadable
/// directory response propagates, so the endpoint can answer
/// `places_failed`.
pub struct PlacesService {
    config: Arc<NavigatorConfig>,
    client: PlacesClient,
    cache: PlacesCache,
}

impl PlacesService {
    pub fn new(config: Arc<NavigatorConfig>) -> PlacesResult<Self> {
        let client = PlacesClient::new(config.clone())?;
        let cache = PlacesCache::new(config.cache_ttl());
        Ok(Self {
            config,
            client,
            cache,
        })
    }

    /// Looks up care facilities near `zip` matching `keyword`.
    pub async fn lookup(&self, zip: &str, keyword: &str) -> PlacesResult<Vec<Provider>> {
        if self.config.places_api_key().is_none() {
            return Ok(Vec::new());
        }

        if let Some(hit) = self.cache.get(zip, keyword) {
            tracing::debug!(zip, keyword, "places cache hit");
            return Ok(hit);
        }

        match self.client.search(zip, keyword).await {
            Ok(providers) => {
                self.cache.put(zip, keyword, providers.clone());
                Ok(providers)
            }
            Err(PlacesError::Transport(err)) => {
                tracing::warn!(
                    zip,
                    keyword,
                    error = %err,
                    "provider directory unavailable, using static fallback"
                );
                Ok(static_fallback(keyword))
            }
            Err(err) => Err(err),
        }
    }
}
