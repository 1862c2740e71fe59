/// Default Notion REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version pinned in the `Notion-Version` header.
pub const DEFAULT_API_VERSION: &str = "2022-06-28";

/// Notion integration settings.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    /// Internal integration token.
    pub token: String,
    /// Target database receiving card reports.
    pub database_id: String,
    pub base_url: String,
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl NotionConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                      |
    /// |-----------------------|----------|------------------------------|
    /// | `NOTION_TOKEN`        | yes      | --                           |
    /// | `NOTION_DATABASE_ID`  | yes      | --                           |
    /// | `NOTION_BASE_URL`     | no       | `https://api.notion.com/v1`  |
    /// | `NOTION_VERSION`      | no       | `2022-06-28`                 |
    /// | `NOTION_TIMEOUT_SECS` | no       | `10`                         |
    ///
    /// Returns `None` when the token or database id is missing, which
    /// disables mirroring to Notion.
    pub fn from_env() -> Option<Self> {
        let token = non_empty_var("NOTION_TOKEN")?;
        let database_id = non_empty_var("NOTION_DATABASE_ID")?;

        let base_url = std::env::var("NOTION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let api_version =
            std::env::var("NOTION_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.into());
        let timeout_secs: u64 = std::env::var("NOTION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("NOTION_TIMEOUT_SECS must be a valid u64");

        Some(Self {
            token,
            database_id,
            base_url,
            api_version,
            timeout_secs,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
