//! Seam between the resolver and an external card catalog.

use async_trait::async_trait;

/// A card as returned by a catalog search, before placeholder substitution
/// and price lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCard {
    pub id: String,
    pub name: Option<String>,
    pub set_name: Option<String>,
    pub set_id: Option<String>,
    pub rarity: Option<String>,
    /// Collector number within the set.
    pub number: Option<String>,
    pub image_url: Option<String>,
}

/// A searchable card catalog.
///
/// Implementations never fail a lookup: transport errors and non-success
/// responses are logged and reported as "no results" / "no price" so the
/// resolver can move on to the next query variant.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Run one search with a catalog query string (e.g. `name:"pikachu"`).
    async fn search(&self, query: &str) -> Vec<RawCard>;

    /// Look up the market price for a card id, if the catalog has one.
    async fn fetch_price(&self, card_id: &str) -> Option<f64>;
}
