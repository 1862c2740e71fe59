//! Card identity resolution: noisy text + optional set hint → catalog records.

use std::sync::Arc;

use crate::card::{CardRecord, SetHint};
use crate::catalog::CardCatalog;
use crate::error::CoreError;
use crate::variants::build_queries;

/// Resolves card names against a [`CardCatalog`].
///
/// Cheap to clone; the catalog handle is shared.
#[derive(Clone)]
pub struct CardResolver {
    catalog: Arc<dyn CardCatalog>,
}

impl CardResolver {
    pub fn new(catalog: Arc<dyn CardCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a raw card name into zero or more canonical records.
    ///
    /// Query variants are tried in order and iteration stops at the first
    /// search that returns at least one card; results from different
    /// variants are never merged. An empty vector means "not found".
    ///
    /// Fails with [`CoreError::Validation`] when `raw_name` is blank.
    pub async fn resolve(
        &self,
        raw_name: &str,
        set_hint: Option<&SetHint>,
    ) -> Result<Vec<CardRecord>, CoreError> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Card name must not be empty".into()));
        }

        for query in build_queries(name, set_hint) {
            tracing::debug!(%query, "Trying catalog query");
            let raw_cards = self.catalog.search(&query).await;
            if raw_cards.is_empty() {
                tracing::debug!(%query, "No catalog results for query");
                continue;
            }

            tracing::info!(%query, count = raw_cards.len(), "Catalog query matched");
            let mut records = Vec::with_capacity(raw_cards.len());
            for raw in &raw_cards {
                let price = self.catalog.fetch_price(&raw.id).await;
                records.push(CardRecord::from_raw(raw, price));
            }
            return Ok(records);
        }

        tracing::info!(name, ?set_hint, "No card found with any query variant");
        Ok(Vec::new())
    }
}
