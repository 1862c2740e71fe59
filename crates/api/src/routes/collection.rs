//! Route definitions for the `/collection` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::collection;
use crate::state::AppState;

/// Collection routes, merged at the API root.
///
/// ```text
/// GET /collection -> list (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/collection", get(collection::list))
}
