use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{error::ProviderError, model::CitySuggestion};

use super::SuggestionProvider;

const DEFAULT_BASE_URL: &str = "http://api.geonames.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Partial inputs shorter than this never hit the network; this trims
/// request volume on the first couple of keystrokes, it is not an error.
pub const MIN_QUERY_CHARS: usize = 3;

/// Result-count cap passed to the provider as `maxRows`.
pub const MAX_ROWS: u32 = 10;

/// Client for the GeoNames city search endpoint.
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    username: String,
    base_url: String,
    http: Client,
}

impl GeoNamesClient {
    pub fn new(username: String) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;

        Ok(Self { username, base_url: DEFAULT_BASE_URL.to_string(), http })
    }

    /// Point the client at a different host, e.g. a mock server in tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeoNamesEntry {
    name: String,
    #[serde(rename = "countryName")]
    country_name: String,
}

#[derive(Debug, Deserialize)]
struct GeoNamesSearchResponse {
    geonames: Vec<GeoNamesEntry>,
}

#[async_trait]
impl SuggestionProvider for GeoNamesClient {
    async fn suggest(&self, partial: &str) -> Result<Vec<CitySuggestion>, ProviderError> {
        if partial.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let url = format!("{}/searchJSON", self.base_url);
        let max_rows = MAX_ROWS.to_string();

        debug!(partial, "requesting city suggestions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", partial),
                ("maxRows", max_rows.as_str()),
                ("username", self.username.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::MalformedResponse(format!(
                "geocoding provider returned status {status}"
            )));
        }

        let body = res.text().await?;

        let parsed: GeoNamesSearchResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        // Provider order is display order; no sorting or dedup.
        Ok(parsed
            .geonames
            .into_iter()
            .map(|entry| CitySuggestion { name: entry.name, country_name: entry.country_name })
            .collect())
    }
}
