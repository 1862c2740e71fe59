//! Client for the Pokémon TCG catalog API.
//!
//! [`api::PokemonTcgApi`] is the thin, fallible REST wrapper.
//! [`CatalogClient`] layers the resolver contract on top: it implements
//! [`cardvault_core::catalog::CardCatalog`] and turns every upstream failure
//! into "no results" so variant iteration can continue.

pub mod api;
pub mod config;
pub mod models;
pub mod pricing;

use async_trait::async_trait;
use cardvault_core::catalog::{CardCatalog, RawCard};

use crate::api::{CatalogApiError, PokemonTcgApi};
use crate::config::CatalogConfig;
use crate::pricing::PriceSource;

/// [`CardCatalog`] backed by the Pokémon TCG REST API.
pub struct CatalogClient {
    api: PokemonTcgApi,
    price_source: PriceSource,
}

impl CatalogClient {
    /// Build a client from configuration.
    ///
    /// Fails only for unusable configuration (e.g. a missing base URL).
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogApiError> {
        Ok(Self {
            api: PokemonTcgApi::new(config)?,
            price_source: config.price_source,
        })
    }
}

#[async_trait]
impl CardCatalog for CatalogClient {
    async fn search(&self, query: &str) -> Vec<RawCard> {
        match self.api.search_cards(query).await {
            Ok(cards) => cards.into_iter().map(RawCard::from).collect(),
            Err(e) => {
                tracing::warn!(query, error = %e, "Catalog search failed, treating as no match");
                Vec::new()
            }
        }
    }

    async fn fetch_price(&self, card_id: &str) -> Option<f64> {
        match self.api.get_card(card_id).await {
            Ok(card) => {
                let price = self.price_source.market_price(&card);
                if price.is_none() {
                    tracing::debug!(card_id, source = ?self.price_source, "No market price available");
                }
                price
            }
            Err(e) => {
                tracing::warn!(card_id, error = %e, "Catalog price lookup failed");
                None
            }
        }
    }
}
