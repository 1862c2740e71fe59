//! Handler for the `/collection` resource.

use axum::extract::State;
use axum::Json;
use cardvault_db::models::card::CollectionEntry;
use cardvault_db::repositories::CardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/collection
///
/// List the caller's collection entries, most recent first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CollectionEntry>>>> {
    let entries = CardRepo::list_by_owner(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, count = entries.len(), "Collection listed");
    Ok(Json(DataResponse { data: entries }))
}
