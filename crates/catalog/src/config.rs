use crate::pricing::PriceSource;

/// Default public endpoint of the Pokémon TCG API.
pub const DEFAULT_BASE_URL: &str = "https://api.pokemontcg.io/v2";

/// Catalog client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL without trailing slash.
    pub base_url: String,
    /// Optional key sent as `X-Api-Key` (raises the upstream rate limit).
    pub api_key: Option<String>,
    /// Which vendor's pricing block is authoritative.
    pub price_source: PriceSource,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `CATALOG_BASE_URL`     | `https://api.pokemontcg.io/v2`   |
    /// | `POKEMON_TCG_API_KEY`  | unset                            |
    /// | `CATALOG_PRICE_SOURCE` | `tcgplayer`                      |
    /// | `CATALOG_TIMEOUT_SECS` | `10`                             |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let api_key = std::env::var("POKEMON_TCG_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let price_source: PriceSource = std::env::var("CATALOG_PRICE_SOURCE")
            .unwrap_or_else(|_| "tcgplayer".into())
            .parse()
            .expect("CATALOG_PRICE_SOURCE must be 'tcgplayer' or 'cardmarket'");

        let timeout_secs: u64 = std::env::var("CATALOG_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("CATALOG_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            price_source,
            timeout_secs,
        }
    }
}
