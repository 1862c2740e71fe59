use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use cardvault_catalog::config::CatalogConfig;
use cardvault_catalog::CatalogClient;
use cardvault_core::mirror::{MemoryMirror, ReportMirror};
use cardvault_core::ocr::TesseractCli;
use cardvault_core::resolver::CardResolver;
use cardvault_notion::config::NotionConfig;
use cardvault_notion::NotionMirror;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardvault_api::config::ServerConfig;
use cardvault_api::router::build_app_router;
use cardvault_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardvault_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = cardvault_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    cardvault_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    cardvault_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Card catalog ---
    let catalog_config = CatalogConfig::from_env();
    let catalog = CatalogClient::new(&catalog_config).expect("Invalid catalog configuration");
    tracing::info!(
        base_url = %catalog_config.base_url,
        price_source = ?catalog_config.price_source,
        "Card catalog client created"
    );
    let resolver = CardResolver::new(Arc::new(catalog));

    // --- Report mirror ---
    let mirror: Arc<dyn ReportMirror> = match NotionConfig::from_env() {
        Some(notion_config) => {
            let notion = NotionMirror::new(&notion_config).expect("Invalid Notion configuration");
            notion.verify_database().await;
            tracing::info!(database_id = %notion_config.database_id, "Notion mirror enabled");
            Arc::new(notion)
        }
        None => {
            tracing::warn!(
                "NOTION_TOKEN or NOTION_DATABASE_ID not set; card reports are kept in memory"
            );
            Arc::new(MemoryMirror::new())
        }
    };

    // --- OCR ---
    let ocr = TesseractCli::new(
        config.ocr.tesseract_bin.clone(),
        Duration::from_secs(config.ocr.timeout_secs),
    );

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        resolver,
        mirror,
        ocr: Arc::new(ocr),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
