use std::sync::Arc;

use cardvault_core::mirror::ReportMirror;
use cardvault_core::ocr::TextExtractor;
use cardvault_core::resolver::CardResolver;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is a pool, an `Arc`, or wraps one.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cardvault_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Card name resolver backed by the external catalog.
    pub resolver: CardResolver,
    /// Document store that card reports are mirrored into.
    pub mirror: Arc<dyn ReportMirror>,
    /// OCR engine for uploaded card photos.
    pub ocr: Arc<dyn TextExtractor>,
}
