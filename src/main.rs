// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::application::chart_service::ChartService;
use crate::infrastructure::config::{load_panels_config, load_service_config};
use crate::infrastructure::rest_repository::RestRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_chart, get_dashboard, health_check, list_panels};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let service_config = load_service_config()?;
    let panels_config = load_panels_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(RestRepository::new(
        service_config.upstream.base_url,
        service_config.upstream.token,
    ));

    // Create service (application layer)
    let chart_service = ChartService::new(
        repository,
        panels_config,
        service_config.aggregation.reference_offset(),
    );

    // Create application state
    let state = Arc::new(AppState { chart_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/panels", get(list_panels))
        .route("/charts/:id", get(get_chart))
        .route("/dashboard", get(get_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = service_config.server.bind.parse()?;
    tracing::info!("Starting logistics-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
