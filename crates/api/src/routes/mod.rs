pub mod auth;
pub mod cards;
pub mod collection;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /cards/search                  resolve a name against the catalog (GET)
/// /cards/upload                  resolve a card photo via OCR (POST, multipart)
/// /cards/prompt                  add a card to the collection (POST, auth)
/// /cards/report                  mirror every match of a query (POST)
///
/// /collection                    list the caller's cards (GET, auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/cards", cards::router())
        .merge(collection::router())
}
