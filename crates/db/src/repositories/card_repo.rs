//! Repository for the `cards` table (collection entries).

use cardvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::card::{CollectionEntry, CreateCollectionEntry};

const COLUMNS: &str = "id, owner_id, card_id, name, collection, set_id, rarity, variant_number, \
                       image_url, market_price, video_id, video_timestamp, notion_page_id, created_at";

/// Provides insert, owner listing and mirror-attachment for collection entries.
pub struct CardRepo;

impl CardRepo {
    /// Insert a resolved card into a user's collection.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollectionEntry,
    ) -> Result<CollectionEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (owner_id, card_id, name, collection, set_id, rarity,
                                variant_number, image_url, market_price, video_id, video_timestamp)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let record = &input.record;
        sqlx::query_as::<_, CollectionEntry>(&query)
            .bind(input.owner_id)
            .bind(&record.id)
            .bind(&record.name)
            .bind(&record.set_name)
            .bind(&record.set_id)
            .bind(&record.rarity)
            .bind(&record.variant_number)
            .bind(&record.image_url)
            .bind(record.market_price)
            .bind(&input.video_id)
            .bind(&input.video_timestamp)
            .fetch_one(pool)
            .await
    }

    /// List a user's collection, most recent first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<CollectionEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CollectionEntry>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Attach the mirror document id. Only sets it once.
    ///
    /// Returns the updated row, or `None` if the entry does not exist or
    /// already has a document id.
    pub async fn set_notion_page_id(
        pool: &PgPool,
        id: DbId,
        notion_page_id: &str,
    ) -> Result<Option<CollectionEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET notion_page_id = $2
             WHERE id = $1 AND notion_page_id IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectionEntry>(&query)
            .bind(id)
            .bind(notion_page_id)
            .fetch_optional(pool)
            .await
    }
}
