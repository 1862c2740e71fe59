use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin (without credentials).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// OCR engine configuration.
    pub ocr: OcrConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8000`  |
    /// | `CORS_ORIGINS`         | `*`     |
    /// | `REQUEST_TIMEOUT_SECS` | `60`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            ocr: OcrConfig::from_env(),
        }
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Settings for the `tesseract` OCR subprocess.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Binary name or path (default: `tesseract`).
    pub tesseract_bin: String,
    /// Maximum time for one OCR run in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl OcrConfig {
    /// | Env Var            | Default     |
    /// |--------------------|-------------|
    /// | `TESSERACT_BIN`    | `tesseract` |
    /// | `OCR_TIMEOUT_SECS` | `30`        |
    pub fn from_env() -> Self {
        let tesseract_bin = std::env::var("TESSERACT_BIN").unwrap_or_else(|_| "tesseract".into());
        let timeout_secs: u64 = std::env::var("OCR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("OCR_TIMEOUT_SECS must be a valid u64");
        Self {
            tesseract_bin,
            timeout_secs,
        }
    }
}
