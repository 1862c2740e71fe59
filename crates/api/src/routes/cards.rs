//! Route definitions for the `/cards` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// Largest accepted card photo.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/cards`.
///
/// ```text
/// GET  /search -> search
/// POST /upload -> upload
/// POST /prompt -> prompt (requires auth)
/// POST /report -> report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(cards::search))
        .route(
            "/upload",
            post(cards::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/prompt", post(cards::prompt))
        .route("/report", post(cards::report))
}
