//! REST client for the Pokémon TCG API.
//!
//! Wraps `GET /cards` (search) and `GET /cards/{id}` (detail) using
//! [`reqwest`]. Every method is fallible; swallowing errors is the job of
//! [`crate::CatalogClient`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;

use crate::config::CatalogConfig;
use crate::models::{ApiCard, CardListResponse, CardResponse};

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The client configuration is unusable (missing/invalid base URL, bad key).
    #[error("Invalid catalog configuration: {0}")]
    Config(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the Pokémon TCG API.
#[derive(Debug)]
pub struct PokemonTcgApi {
    client: reqwest::Client,
    base_url: Url,
}

impl PokemonTcgApi {
    /// Create a client from configuration.
    ///
    /// Fails with [`CatalogApiError::Config`] when the base URL is empty or
    /// not an absolute URL, or when the API key is not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogApiError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| CatalogApiError::Config("API key is not a valid header".into()))?;
            headers.insert("X-Api-Key", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Search cards with a query-language filter, e.g. `name:"pikachu"`.
    pub async fn search_cards(&self, query: &str) -> Result<Vec<ApiCard>, CatalogApiError> {
        let response = self
            .client
            .get(self.endpoint(&["cards"]))
            .query(&[("q", query)])
            .send()
            .await?;

        let list: CardListResponse = Self::parse_response(response).await?;
        Ok(list.data)
    }

    /// Fetch full card detail (including pricing blocks) by id.
    pub async fn get_card(&self, card_id: &str) -> Result<ApiCard, CatalogApiError> {
        let response = self
            .client
            .get(self.endpoint(&["cards", card_id]))
            .send()
            .await?;

        let card: CardResponse = Self::parse_response(response).await?;
        Ok(card.data)
    }

    /// Base URL joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogApiError::Config("base URL is not set".into()));
    }
    let url = Url::parse(trimmed)
        .map_err(|e| CatalogApiError::Config(format!("invalid base URL '{trimmed}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CatalogApiError::Config(format!(
            "base URL '{trimmed}' cannot carry a path"
        )));
    }
    Ok(url)
}
