//! Wire types for the Pokémon TCG API (`/v2/cards`).
//!
//! Only the fields this service reads are modelled; everything is optional
//! except the card id because the upstream omits fields freely.

use cardvault_core::catalog::RawCard;
use serde::Deserialize;

/// `GET /cards?q=...` envelope.
#[derive(Debug, Deserialize)]
pub struct CardListResponse {
    #[serde(default)]
    pub data: Vec<ApiCard>,
}

/// `GET /cards/{id}` envelope.
#[derive(Debug, Deserialize)]
pub struct CardResponse {
    pub data: ApiCard,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCard {
    pub id: String,
    pub name: Option<String>,
    pub set: Option<ApiSet>,
    pub rarity: Option<String>,
    pub number: Option<String>,
    pub images: Option<ApiImages>,
    pub tcgplayer: Option<TcgPlayer>,
    pub cardmarket: Option<CardMarket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSet {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiImages {
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TcgPlayer {
    pub prices: Option<TcgPlayerPrices>,
}

/// Per-finish price tiers reported by TCGplayer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerPrices {
    pub holofoil: Option<PriceTier>,
    pub normal: Option<PriceTier>,
    pub reverse_holofoil: Option<PriceTier>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceTier {
    pub market: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardMarket {
    pub prices: Option<CardMarketPrices>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMarketPrices {
    pub average_sell_price: Option<f64>,
    pub trend_price: Option<f64>,
}

impl From<ApiCard> for RawCard {
    fn from(card: ApiCard) -> Self {
        let (set_id, set_name) = card
            .set
            .map(|s| (s.id, s.name))
            .unwrap_or_default();
        let image_url = card.images.and_then(|i| i.large.or(i.small));

        RawCard {
            id: card.id,
            name: card.name,
            set_name,
            set_id,
            rarity: card.rarity,
            number: card.number,
            image_url,
        }
    }
}
