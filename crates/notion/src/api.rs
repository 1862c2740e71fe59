//! REST client for the Notion API endpoints used by the report mirror.
//!
//! Covers database retrieval/update, filtered database queries and page
//! creation. Authentication and API version are sent as default headers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::NotionConfig;

/// Errors from the Notion REST layer.
#[derive(Debug, thiserror::Error)]
pub enum NotionApiError {
    /// Token, version or base URL cannot be used.
    #[error("Invalid Notion configuration: {0}")]
    Config(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Notion returned a non-2xx status code.
    #[error("Notion API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

/// Result page of `POST /databases/{id}/query`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Minimal page object returned by `POST /pages`.
#[derive(Debug, Deserialize)]
pub struct PageRef {
    pub id: String,
}

/// HTTP client bound to one Notion database.
#[derive(Debug)]
pub struct NotionApi {
    client: reqwest::Client,
    base_url: String,
    database_id: String,
}

impl NotionApi {
    pub fn new(config: &NotionConfig) -> Result<Self, NotionApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(NotionApiError::Config(format!(
                "base URL '{base_url}' must be an absolute http(s) URL"
            )));
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| NotionApiError::Config("token is not a valid header".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        let version = HeaderValue::from_str(&config.api_version)
            .map_err(|_| NotionApiError::Config("API version is not a valid header".into()))?;
        headers.insert("Notion-Version", version);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            database_id: config.database_id.clone(),
        })
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// `GET /databases/{id}`: title, properties and their types.
    pub async fn retrieve_database(&self) -> Result<Value, NotionApiError> {
        let response = self
            .client
            .get(format!("{}/databases/{}", self.base_url, self.database_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `PATCH /databases/{id}` adding one property with an empty configuration.
    pub async fn add_property(&self, name: &str, kind: &str) -> Result<(), NotionApiError> {
        let body = json!({
            "properties": {
                name: { "type": kind, kind: {} }
            }
        });

        let response = self
            .client
            .patch(format!("{}/databases/{}", self.base_url, self.database_id))
            .json(&body)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// `POST /databases/{id}/query` with a property filter.
    pub async fn query_database(&self, filter: Value) -> Result<QueryResponse, NotionApiError> {
        let body = json!({ "filter": filter, "page_size": 1 });

        let response = self
            .client
            .post(format!("{}/databases/{}/query", self.base_url, self.database_id))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `POST /pages` creating a row in the bound database.
    pub async fn create_page(&self, properties: Value) -> Result<PageRef, NotionApiError> {
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
        });

        let response = self
            .client
            .post(format!("{}/pages", self.base_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, NotionApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NotionApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, NotionApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
