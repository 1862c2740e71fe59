//! Handlers for the `/cards` resource: catalog search, photo upload,
//! manual entry and batch reporting.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cardvault_core::card::{CardRecord, SetHint};
use cardvault_core::error::CoreError;
use cardvault_core::mirror::{parse_method, METHOD_MANUAL};
use cardvault_core::ocr::{ensure_supported_image, name_candidate, OcrError};
use cardvault_core::report::{create_group_report, publish_record};
use cardvault_db::models::card::{CollectionEntry, CreateCollectionEntry};
use cardvault_db::repositories::CardRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{CardPayload, CardResponse, DataResponse};
use crate::state::AppState;

/// Error detail returned when the catalog has no match.
const CATALOG_MISS: &str = "Card not found in Pokemon TCG API";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /cards/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub set_id: Option<String>,
    pub set_name: Option<String>,
}

/// Query parameters for `POST /cards/report`.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub query: String,
    pub set_id: Option<String>,
    pub set_name: Option<String>,
    pub group_id: Option<String>,
    /// `Manual` (default) or `Image`.
    pub method: Option<String>,
}

/// Request body for `POST /cards/prompt`.
#[derive(Debug, Deserialize, Validate)]
pub struct PromptRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub collection: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    #[serde(default)]
    pub market_price: f64,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub image_url: String,
    pub video_id: Option<String>,
    pub video_timestamp: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cards/search
///
/// Resolve a card name (plus optional set) against the catalog. No match is
/// a `success: false` body, not an error status.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<CardResponse>> {
    let hint = SetHint::from_params(params.set_id.as_deref(), params.set_name.as_deref());
    let records = state.resolver.resolve(&params.query, hint.as_ref()).await?;

    if records.is_empty() {
        return Ok(Json(CardResponse::not_found(CATALOG_MISS)));
    }

    Ok(Json(CardResponse::found(
        "Cards found successfully",
        payloads(records),
    )))
}

/// POST /api/v1/cards/upload
///
/// Accepts a multipart form with a required `file` field (PNG, JPEG or
/// WebP) and optional `set_id` / `set_name` fields. The card name is read
/// from the photo by OCR and then resolved like a search.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<CardResponse>> {
    let mut image: Option<Vec<u8>> = None;
    let mut set_id: Option<String> = None;
    let mut set_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some(data.to_vec());
            }
            "set_id" | "set_name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if name == "set_id" {
                    set_id = Some(text);
                } else {
                    set_name = Some(text);
                }
            }
            _ => {}
        }
    }

    let image =
        image.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let format = ensure_supported_image(&image).map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::debug!(?format, bytes = image.len(), "Card photo received");

    let text = match state.ocr.extract_text(&image).await {
        Ok(text) => text,
        Err(e) => {
            log_ocr_failure(&e);
            return Ok(Json(CardResponse::failed(
                "Error processing image",
                e.to_string(),
            )));
        }
    };

    let Some(candidate) = name_candidate(&text) else {
        return Ok(Json(CardResponse::failed(
            "Error processing image",
            "No card text detected",
        )));
    };
    tracing::info!(%candidate, "OCR name candidate");

    let hint = SetHint::from_params(set_id.as_deref(), set_name.as_deref());
    let records = state.resolver.resolve(&candidate, hint.as_ref()).await?;
    if records.is_empty() {
        return Ok(Json(CardResponse::not_found(CATALOG_MISS)));
    }

    Ok(Json(CardResponse::found(
        "Cards processed successfully",
        payloads(records),
    )))
}

/// POST /api/v1/cards/prompt
///
/// Add a card to the caller's collection by name. The first catalog match
/// is authoritative; request values only fill fields the catalog left at
/// their placeholders. The entry is saved first and then mirrored; a mirror
/// failure leaves the entry without a `notion_page_id`.
pub async fn prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PromptRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CollectionEntry>>)> {
    input.validate()?;

    let mut record: CardRecord = state
        .resolver
        .resolve(&input.name, None)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Card",
                key: input.name.trim().to_string(),
            })
        })?;
    record.fill_placeholders(&input.rarity, input.market_price, &input.image_url);

    if !input.collection.trim().is_empty() && input.collection.trim() != record.set_name {
        tracing::debug!(
            requested = %input.collection,
            resolved = %record.set_name,
            "Requested collection differs from catalog set"
        );
    }

    let entry = CardRepo::create(
        &state.pool,
        &CreateCollectionEntry {
            owner_id: auth.user_id,
            record: record.clone(),
            video_id: input.video_id,
            video_timestamp: input.video_timestamp,
        },
    )
    .await?;
    tracing::info!(entry_id = entry.id, card_id = %entry.card_id, user_id = auth.user_id, "Card added to collection");

    let entry = match publish_record(state.mirror.as_ref(), record, METHOD_MANUAL, None).await {
        Ok(published) => CardRepo::set_notion_page_id(&state.pool, entry.id, &published.document_id)
            .await?
            .unwrap_or(entry),
        Err(e) => {
            tracing::warn!(entry_id = entry.id, error = %e, "Failed to mirror collection entry");
            entry
        }
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// POST /api/v1/cards/report
///
/// Resolve a query and mirror every match, tagging each document with the
/// optional `group_id`. Per-card mirror failures are skipped and counted.
pub async fn report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<CardResponse>> {
    let method = match params.method.as_deref() {
        None => METHOD_MANUAL,
        Some(raw) => parse_method(raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown method '{raw}'. Expected: Manual, Image"
            )))
        })?,
    };
    let hint = SetHint::from_params(params.set_id.as_deref(), params.set_name.as_deref());
    let group_id = params
        .group_id
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty());

    let outcome = create_group_report(
        &state.resolver,
        state.mirror.as_ref(),
        &params.query,
        hint.as_ref(),
        group_id,
        method,
    )
    .await?;

    if outcome.matched == 0 {
        return Ok(Json(CardResponse::not_found(
            "No cards found matching the search criteria",
        )));
    }

    let message = outcome.message();
    tracing::info!(
        created = outcome.created(),
        repeated = outcome.repeated,
        failed = outcome.failed,
        "Card report finished"
    );
    let cards = outcome.published.into_iter().map(CardPayload::from).collect();
    Ok(Json(CardResponse::found(message, cards)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn payloads(records: Vec<CardRecord>) -> Vec<CardPayload> {
    records.into_iter().map(CardPayload::from).collect()
}

fn log_ocr_failure(err: &OcrError) {
    match err {
        OcrError::Io(_) | OcrError::Timeout(_) => {
            tracing::error!(error = %err, "OCR engine unavailable")
        }
        _ => tracing::warn!(error = %err, "OCR failed"),
    }
}
