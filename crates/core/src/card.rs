//! Canonical card records and the placeholder rules applied when the
//! catalog omits data.
//!
//! A [`CardRecord`] is only ever built from a catalog result (see
//! [`CardRecord::from_raw`]); every string field is guaranteed non-empty and
//! the market price is guaranteed finite and non-negative.

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::catalog::RawCard;

/// Image shown when the catalog has no usable image for a card.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://example.com/placeholder.jpg";

pub const UNKNOWN_NAME: &str = "Unknown Card";
pub const UNKNOWN_SET_NAME: &str = "Unknown Set";
pub const UNKNOWN_SET_ID: &str = "unknown";
pub const UNKNOWN_RARITY: &str = "Unknown";
pub const UNKNOWN_VARIANT_NUMBER: &str = "N/A";

/// Optional set restriction supplied alongside a card name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetHint {
    /// Human-readable set name, e.g. `"Scarlet & Violet"`.
    Name(String),
    /// Catalog set identifier, e.g. `"base1"`.
    Id(String),
}

impl SetHint {
    /// Build a hint from optional `set_id` / `set_name` request parameters.
    ///
    /// An id wins over a name. Blank values are ignored.
    pub fn from_params(set_id: Option<&str>, set_name: Option<&str>) -> Option<Self> {
        fn clean(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        match (clean(set_id), clean(set_name)) {
            (Some(id), _) => Some(Self::Id(id.to_string())),
            (None, Some(name)) => Some(Self::Name(name.to_string())),
            (None, None) => None,
        }
    }
}

/// A card as resolved against the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Stable catalog identifier (e.g. `"base1-4"`).
    pub id: String,
    pub name: String,
    pub set_name: String,
    pub set_id: String,
    pub rarity: String,
    pub variant_number: String,
    pub image_url: String,
    pub market_price: f64,
}

impl CardRecord {
    /// Reconcile a raw catalog result and a looked-up price into a record.
    ///
    /// Missing or blank fields get placeholder values, a non-absolute image
    /// URL is replaced by [`PLACEHOLDER_IMAGE_URL`], and an unknown price
    /// becomes `0.0`.
    pub fn from_raw(raw: &RawCard, market_price: Option<f64>) -> Self {
        Self {
            id: raw.id.clone(),
            name: non_empty_or(raw.name.as_deref(), UNKNOWN_NAME),
            set_name: non_empty_or(raw.set_name.as_deref(), UNKNOWN_SET_NAME),
            set_id: non_empty_or(raw.set_id.as_deref(), UNKNOWN_SET_ID),
            rarity: non_empty_or(raw.rarity.as_deref(), UNKNOWN_RARITY),
            variant_number: non_empty_or(raw.number.as_deref(), UNKNOWN_VARIANT_NUMBER),
            image_url: image_url_or_placeholder(raw.image_url.as_deref()),
            market_price: sanitize_price(market_price),
        }
    }

    /// Whether the image URL is the placeholder rather than a catalog image.
    pub fn has_placeholder_image(&self) -> bool {
        self.image_url == PLACEHOLDER_IMAGE_URL
    }

    /// Fill placeholder fields from user-supplied values.
    ///
    /// Catalog data always wins: only the rarity, price and image that the
    /// catalog left at their placeholders are replaced, and only by usable
    /// values (non-blank rarity, positive price, absolute image URL).
    pub fn fill_placeholders(&mut self, rarity: &str, market_price: f64, image_url: &str) {
        let rarity = rarity.trim();
        if self.rarity == UNKNOWN_RARITY && !rarity.is_empty() {
            self.rarity = rarity.to_string();
        }
        if self.market_price == 0.0 {
            self.market_price = sanitize_price(Some(market_price));
        }
        let image_url = image_url.trim();
        if self.has_placeholder_image() && is_absolute_url(image_url) {
            self.image_url = image_url.to_string();
        }
    }
}

/// Clamp an optional price to a finite, non-negative value.
pub fn sanitize_price(price: Option<f64>) -> f64 {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => 0.0,
    }
}

/// Return `url` if it is a valid absolute URL, otherwise the placeholder.
pub fn image_url_or_placeholder(url: Option<&str>) -> String {
    match url.map(str::trim) {
        Some(u) if is_absolute_url(u) => u.to_string(),
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

/// Absolute `http(s)` URL check used for card images.
pub fn is_absolute_url(url: &str) -> bool {
    (url.starts_with("http://") || url.starts_with("https://")) && url.validate_url()
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
