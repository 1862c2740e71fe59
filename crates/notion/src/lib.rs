//! Notion-backed report mirror.
//!
//! Each resolved card becomes one page in a Notion database. The database
//! schema is checked (and missing properties created) once at startup via
//! [`NotionMirror::verify_database`].

pub mod api;
pub mod config;
pub mod properties;

use async_trait::async_trait;
use cardvault_core::mirror::{CardReport, MirrorError, ReportMirror};

use crate::api::{NotionApi, NotionApiError};
use crate::config::NotionConfig;
use crate::properties::{card_id_filter, diff_schema, page_properties};

/// [`ReportMirror`] writing card reports into a Notion database.
pub struct NotionMirror {
    api: NotionApi,
}

impl NotionMirror {
    pub fn new(config: &NotionConfig) -> Result<Self, NotionApiError> {
        Ok(Self {
            api: NotionApi::new(config)?,
        })
    }

    /// Check the database schema and create any missing report properties.
    ///
    /// Never fails: every problem is logged so a misconfigured database does
    /// not stop the server from starting.
    pub async fn verify_database(&self) {
        let database = match self.api.retrieve_database().await {
            Ok(db) => db,
            Err(e) => {
                tracing::error!(
                    database_id = %self.api.database_id(),
                    error = %e,
                    "Failed to retrieve Notion database"
                );
                return;
            }
        };

        let title = database["title"][0]["text"]["content"]
            .as_str()
            .unwrap_or("<untitled>");
        tracing::info!(title, "Connected to Notion database");

        let diff = diff_schema(&database);
        for (name, expected, actual) in &diff.mismatched {
            tracing::warn!(
                property = name,
                expected = expected,
                actual = %actual,
                "Notion property has incorrect type"
            );
        }
        for (name, kind) in &diff.missing {
            tracing::info!(property = name, kind = kind, "Creating missing Notion property");
            if let Err(e) = self.api.add_property(name, kind).await {
                tracing::error!(property = name, error = %e, "Failed to create Notion property");
            }
        }

        tracing::info!("Notion database structure verification completed");
    }
}

#[async_trait]
impl ReportMirror for NotionMirror {
    async fn exists(&self, card_id: &str) -> Result<bool, MirrorError> {
        let response = self
            .api
            .query_database(card_id_filter(card_id))
            .await
            .map_err(to_mirror_error)?;
        Ok(!response.results.is_empty())
    }

    async fn publish(&self, report: &CardReport) -> Result<String, MirrorError> {
        let page = self
            .api
            .create_page(page_properties(report))
            .await
            .map_err(to_mirror_error)?;
        Ok(page.id)
    }
}

fn to_mirror_error(err: NotionApiError) -> MirrorError {
    match err {
        NotionApiError::ApiError { status, body } => MirrorError::Api { status, body },
        NotionApiError::Request(e) if e.is_decode() => MirrorError::InvalidResponse(e.to_string()),
        other => MirrorError::Transport(other.to_string()),
    }
}
