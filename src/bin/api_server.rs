// src/bin/api_server.rs

use book_catalog::infra::telemetry;
use book_catalog::transport;
use book_catalog::{CatalogConfig, CatalogService};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    // --- Configuration ---
    let config = CatalogConfig::from_env()?;

    // --- Service Initialization ---
    info!(backend = ?config.backend, "initializing catalog service");
    let catalog = CatalogService::from_config(&config).await?;
    if let Err(e) = catalog.ping().await {
        warn!(error = %e, "store did not answer the startup ping; continuing");
    }

    let app_state = transport::http::AppState { catalog };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "API server listening (Swagger UI at /swagger-ui)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
