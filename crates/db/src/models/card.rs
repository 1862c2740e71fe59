//! Collection entries: cards a user owns.

use cardvault_core::card::CardRecord;
use cardvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `cards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectionEntry {
    pub id: DbId,
    pub owner_id: DbId,
    /// Catalog identifier of the resolved card.
    pub card_id: String,
    pub name: String,
    /// Set name.
    pub collection: String,
    pub set_id: String,
    pub rarity: String,
    pub variant_number: String,
    pub image_url: String,
    pub market_price: f64,
    pub video_id: Option<String>,
    pub video_timestamp: Option<String>,
    /// Mirror document id, attached once mirroring succeeds.
    pub notion_page_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a resolved card into a user's collection.
#[derive(Debug, Clone)]
pub struct CreateCollectionEntry {
    pub owner_id: DbId,
    pub record: CardRecord,
    pub video_id: Option<String>,
    pub video_timestamp: Option<String>,
}
