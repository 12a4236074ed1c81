//! HTTP client for the places nearby-search REST endpoint.
//!
//! Wraps `reqwest` with API key management, envelope status checking, and
//! typed response deserialization. All requests go through the retry layer;
//! transient failures back off, application errors surface immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use placegrid_core::models::{Coordinate, PlaceRecord};
use placegrid_core::ports::PlaceSearch;
use placegrid_core::PlacegridError;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{NearbySearchResponse, PlaceResult};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";

/// Client for the places nearby-search API.
///
/// Manages the HTTP client, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::Config`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("placegrid/0.1 (coverage-search)")
            .build()?;

        // Normalise: the base URL must end with exactly one slash so that
        // joining the endpoint path appends rather than replaces.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| PlacesError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Override the retry policy (attempts beyond the first, base delay).
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Issues one nearby search: places of `category` within `radius_m`
    /// meters of `center`.
    ///
    /// `ZERO_RESULTS` is success with an empty list.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::QuotaExceeded`] on `OVER_QUERY_LIMIT` (never retried).
    /// - [`PlacesError::Api`] on any other non-OK envelope status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status
    ///   after retries.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn nearby_search(
        &self,
        center: Coordinate,
        radius_m: f64,
        category: &str,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.nearby_search_once(center, radius_m, category)
        })
        .await
    }

    async fn nearby_search_once(
        &self,
        center: Coordinate,
        radius_m: f64,
        category: &str,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let url = self.build_url(center, radius_m, category)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: serde_json::Value = response.json().await?;

        let envelope: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(type={category})"),
                source: e,
            })?;

        match envelope.status.as_str() {
            "OK" => Ok(envelope.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            "OVER_QUERY_LIMIT" => Err(PlacesError::QuotaExceeded(
                envelope.error_message.unwrap_or_else(|| "OVER_QUERY_LIMIT".to_owned()),
            )),
            status => Err(PlacesError::Api {
                status: status.to_owned(),
                message: envelope
                    .error_message
                    .unwrap_or_else(|| "no error message".to_owned()),
            }),
        }
    }

    fn build_url(
        &self,
        center: Coordinate,
        radius_m: f64,
        category: &str,
    ) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(NEARBY_SEARCH_PATH)
            .map_err(|e| PlacesError::Config(format!("invalid endpoint path: {e}")))?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("location", &format!("{},{}", center.lat, center.lon))
            .append_pair("radius", &radius_m.to_string())
            .append_pair("type", category);
        Ok(url)
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn search(
        &self,
        center: Coordinate,
        radius_m: f64,
        category: &str,
    ) -> placegrid_core::Result<Vec<PlaceRecord>> {
        let results = self
            .nearby_search(center, radius_m, category)
            .await
            .map_err(|e| PlacegridError::Query { message: e.to_string() })?;
        Ok(results.into_iter().map(PlaceResult::into_record).collect())
    }
}
