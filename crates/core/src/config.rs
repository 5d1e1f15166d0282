//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::{NavigatorError, NavigatorResult};
use std::time::Duration;

/// City appended to every provider text-search query.
pub const DEFAULT_SEARCH_CITY: &str = "Santa Monica";

/// Lifetime of a cached provider lookup.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Upper bound on a single provider-directory request. A single attempt per
/// call; on timeout the caller takes the static fallback path.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Navigator configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    places_api_key: Option<String>,
    search_city: String,
    request_timeout: Duration,
    cache_ttl: Duration,
}

impl NavigatorConfig {
    /// Create a new `NavigatorConfig`.
    ///
    /// A present-but-blank API key is treated as absent so that an empty
    /// `GOOGLE_API_KEY=` in the environment degrades to the no-credential
    /// path instead of producing doomed upstream requests.
    pub fn new(
        places_api_key: Option<String>,
        search_city: String,
        request_timeout: Duration,
        cache_ttl: Duration,
    ) -> NavigatorResult<Self> {
        if search_city.trim().is_empty() {
            return Err(NavigatorError::InvalidInput(
                "search_city cannot be empty".into(),
            ));
        }
        if request_timeout.is_zero() {
            return Err(NavigatorError::InvalidInput(
                "request_timeout must be non-zero".into(),
            ));
        }

        let places_api_key = places_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            places_api_key,
            search_city,
            request_timeout,
            cache_ttl,
        })
    }

    /// Configuration with default city, timeout and TTL.
    pub fn with_defaults(places_api_key: Option<String>) -> NavigatorResult<Self> {
        Self::new(
            places_api_key,
            DEFAULT_SEARCH_CITY.to_string(),
            DEFAULT_REQUEST_TIMEOUT,
            DEFAULT_CACHE_TTL,
        )
    }

    pub fn places_api_key(&self) -> Option<&str> {
        self.places_api_key.as_deref()
    }

    pub fn search_city(&self) -> &str {
        &self.search_city
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_treated_as_absent() {
        let cfg = NavigatorConfig::with_defaults(Some("   ".into())).unwrap();
        assert!(cfg.places_api_key().is_none());
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let cfg = NavigatorConfig::with_defaults(Some(" key-123 ".into())).unwrap();
        assert_eq!(cfg.places_api_key(), Some("key-123"));
    }

    #[test]
    fn test_empty_city_rejected() {
        let result = NavigatorConfig::new(
            None,
            "  ".into(),
            DEFAULT_REQUEST_TIMEOUT,
            DEFAULT_CACHE_TTL,
        );
        assert!(matches!(result, Err(NavigatorError::InvalidInput(_))));
    }
}
