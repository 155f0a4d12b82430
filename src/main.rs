// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use std::{env, sync::Arc};
use wavespeed_relay::{
    api::{start_server, AppState},
    cli::Cli,
    config::RelayConfig,
    version,
    wavespeed::{PredictionBackend, WaveSpeedClient},
};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    if dotenv_loaded {
        tracing::info!(".env file loaded");
    } else {
        tracing::debug!("No .env file found, using process environment");
    }

    let cli = Cli::parse();
    tracing::info!("🚀 Starting {}", version::get_version_string());

    let config = RelayConfig::from_env();
    config.validate().context("invalid relay configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    let client = WaveSpeedClient::new(&config).context("failed to build WaveSpeed client")?;
    let backend: Arc<dyn PredictionBackend> = Arc::new(client);

    let public_url = config.public_url_for(cli.port);
    let state = AppState::new(backend, config, public_url);

    start_server(state, cli.socket_addr()).await
}
