// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::generate_image::generate_image_handler;
use super::handlers::{health_handler, root_handler};
use crate::config::RelayConfig;
use crate::wavespeed::PredictionBackend;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn PredictionBackend>,
    pub config: Arc<RelayConfig>,
    /// Base URL used in documentation examples
    pub public_url: String,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn PredictionBackend>,
        config: RelayConfig,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            config: Arc::new(config),
            public_url: public_url.into(),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Documentation root
        .route("/", get(root_handler))
        // Image generation
        .route("/generate", get(generate_image_handler))
        // Liveness probe
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let public_url = state.public_url.clone();
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server ready at {}", public_url);
    info!("Try: {}/generate?prompt=a%20colorful%20parrot", public_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
