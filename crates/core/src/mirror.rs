//! Mirroring resolved cards into an external document store.
//!
//! The production mirror is a Notion database (see the `cardvault-notion`
//! crate). [`MemoryMirror`] keeps reports in process and is used when no
//! document store is configured.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::card::CardRecord;
use crate::types::Timestamp;

/// How a card entered the system, recorded on the mirror document.
pub const METHOD_MANUAL: &str = "Manual";
pub const METHOD_IMAGE: &str = "Image";

/// Match a user-supplied method name (any case) to its canonical form.
pub fn parse_method(value: &str) -> Option<&'static str> {
    [METHOD_MANUAL, METHOD_IMAGE]
        .into_iter()
        .find(|method| method.eq_ignore_ascii_case(value.trim()))
}

/// One mirror document describing a resolved card.
#[derive(Debug, Clone, Serialize)]
pub struct CardReport {
    pub record: CardRecord,
    pub method: String,
    pub group_id: Option<String>,
    /// Whether a document for the same card id already existed when this
    /// report was built. Advisory only: duplicates are still published.
    pub repeated: bool,
    pub created_at: Timestamp,
}

impl CardReport {
    pub fn new(record: CardRecord, method: &str, group_id: Option<&str>, repeated: bool) -> Self {
        Self {
            record,
            method: method.to_string(),
            group_id: group_id.map(str::to_string),
            repeated,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Errors from a mirror backend.
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    /// The backend could not be reached.
    #[error("Mirror request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Mirror API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The backend answered with something we could not interpret.
    #[error("Unexpected mirror response: {0}")]
    InvalidResponse(String),
}

/// A document store that mirrors card reports.
#[async_trait]
pub trait ReportMirror: Send + Sync {
    /// Whether at least one document is tagged with `card_id`.
    async fn exists(&self, card_id: &str) -> Result<bool, MirrorError>;

    /// Create one document for `report`, returning its document id.
    async fn publish(&self, report: &CardReport) -> Result<String, MirrorError>;
}

/// In-process mirror that keeps every published report.
#[derive(Debug, Default)]
pub struct MemoryMirror {
    documents: RwLock<Vec<(String, CardReport)>>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents published so far.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Snapshot of all published reports in publish order.
    pub async fn reports(&self) -> Vec<CardReport> {
        self.documents
            .read()
            .await
            .iter()
            .map(|(_, report)| report.clone())
            .collect()
    }
}

#[async_trait]
impl ReportMirror for MemoryMirror {
    async fn exists(&self, card_id: &str) -> Result<bool, MirrorError> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .any(|(_, report)| report.record.id == card_id))
    }

    async fn publish(&self, report: &CardReport) -> Result<String, MirrorError> {
        let mut documents = self.documents.write().await;
        let document_id = format!("memory-{}", documents.len() + 1);
        documents.push((document_id.clone(), report.clone()));
        tracing::debug!(%document_id, card_id = %report.record.id, "Stored card report in memory");
        Ok(document_id)
    }
}
