//! HTTP client for the provider directory (Google Places text search).

use navigator_core::{NavigatorConfig, Provider};
use serde::Deserialize;
use std::sync::Arc;

use crate::{PlacesError, PlacesResult};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// At most this many candidates are taken from a directory response.
const MAX_RESULTS: usize = 10;

#[derive(Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl PlaceResult {
    fn into_provider(self) -> Provider {
        let location = self.geometry.and_then(|g| g.location);
        Provider {
            id: self.place_id,
            name: self.name,
            address: self
                .formatted_address
                .or(self.vicinity)
                .unwrap_or_default(),
            lat: location.as_ref().map(|l| l.lat),
            lng: location.as_ref().map(|l| l.lng),
            phone: self.formatted_phone_number.unwrap_or_default(),
            // The directory carries no insurance data; the filter treats an
            // empty set as "unknown", and the caller's broadening policy
            // keeps these candidates visible.
            accepted_insurances: vec![],
        }
    }
}

/// Thin client over the directory's text-search endpoint. One attempt per
/// call, bounded by the configured request timeout; retries are the caller's
/// concern (there are none).
pub struct PlacesClient {
    http: reqwest::Client,
    config: Arc<NavigatorConfig>,
}

impl PlacesClient {
    pub fn new(config: Arc<NavigatorConfig>) -> PlacesResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(PlacesError::Transport)?;
        Ok(Self { http, config })
    }

    /// Free-text directory query: `"{keyword} medical {city} {zip}"`, with
    /// blank parts dropped.
    pub(crate) fn search_query(&self, zip: &str, keyword: &str) -> String {
        [keyword, "medical", self.config.search_city(), zip]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Searches the directory for care facilities near `zip` matching
    /// `keyword`.
    ///
    /// # Errors
    ///
    /// `PlacesError::Transport` on connection failure or timeout,
    /// `PlacesError::Decode` when the response body is not the expected
    /// shape.
    pub async fn search(&self, zip: &str, keyword: &str) -> PlacesResult<Vec<Provider>> {
        let api_key = self.config.places_api_key().unwrap_or_default();
        let query = self.search_query(zip, keyword);

        let response = self
            .http
            .get(TEXT_SEARCH_URL)
            .query(&[("query", query.as_str()), ("key", api_key)])
            .send()
            .await
            .map_err(PlacesError::Transport)?;

        let body: TextSearchResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                PlacesError::Decode(e)
            } else {
                PlacesError::Transport(e)
            }
        })?;

        Ok(body
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .map(PlaceResult::into_provider)
            .collect())
    }
}
