#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A catalog or mirror service could not be reached.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
