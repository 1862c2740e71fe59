//! Market-price extraction strategies.
//!
//! The catalog carries two vendor pricing blocks with different shapes.
//! Which one is authoritative is a deployment choice, so both are kept as
//! [`PriceSource`] strategies.

use std::str::FromStr;

use crate::models::ApiCard;

/// Vendor whose pricing block is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSource {
    /// TCGplayer tiers: holofoil, then normal, then reverse holofoil.
    #[default]
    TcgPlayer,
    /// Cardmarket average sell price, falling back to the trend price.
    CardMarket,
}

impl FromStr for PriceSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcgplayer" => Ok(Self::TcgPlayer),
            "cardmarket" => Ok(Self::CardMarket),
            other => Err(format!("unknown price source '{other}'")),
        }
    }
}

impl PriceSource {
    /// Extract the market price from a full card payload.
    ///
    /// Zero or missing values are treated as absent so the next tier is
    /// consulted. Returns `None` when no tier has a price.
    pub fn market_price(&self, card: &ApiCard) -> Option<f64> {
        match self {
            Self::TcgPlayer => {
                let prices = card.tcgplayer.as_ref()?.prices.as_ref()?;
                [&prices.holofoil, &prices.normal, &prices.reverse_holofoil]
                    .into_iter()
                    .find_map(|tier| tier.as_ref().and_then(|t| positive(t.market)))
            }
            Self::CardMarket => {
                let prices = card.cardmarket.as_ref()?.prices.as_ref()?;
                positive(prices.average_sell_price).or_else(|| positive(prices.trend_price))
            }
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
