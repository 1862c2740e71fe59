//! Shared response envelope types for API handlers.
//!
//! Authenticated resources use the `{ "data": ... }` envelope
//! ([`DataResponse`]). The public card lookup endpoints answer with a
//! [`CardResponse`] whose `success` flag distinguishes "found" from
//! "not found" without an error status.

use cardvault_core::card::CardRecord;
use cardvault_core::report::PublishedReport;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result envelope for search, upload and report requests.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CardResponse {
    pub fn found(message: impl Into<String>, cards: Vec<CardPayload>) -> Self {
        Self {
            success: true,
            message: message.into(),
            cards: Some(cards),
            error: None,
        }
    }

    /// A well-formed request that matched nothing.
    pub fn not_found(error: impl Into<String>) -> Self {
        Self::failed("No cards found", error)
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            cards: None,
            error: Some(error.into()),
        }
    }
}

/// One card as returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct CardPayload {
    pub card_id: String,
    pub name: String,
    /// Set name.
    pub collection: String,
    pub set_id: String,
    pub market_price: f64,
    pub rarity: String,
    pub image_url: String,
    pub variant_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub repeated: bool,
}

impl From<CardRecord> for CardPayload {
    fn from(record: CardRecord) -> Self {
        Self {
            card_id: record.id,
            name: record.name,
            collection: record.set_name,
            set_id: record.set_id,
            market_price: record.market_price,
            rarity: record.rarity,
            image_url: record.image_url,
            variant_number: record.variant_number,
            group_id: None,
            repeated: false,
        }
    }
}

impl From<PublishedReport> for CardPayload {
    fn from(published: PublishedReport) -> Self {
        let report = published.report;
        Self {
            group_id: report.group_id,
            repeated: report.repeated,
            ..CardPayload::from(report.record)
        }
    }
}
