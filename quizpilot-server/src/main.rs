//! QuizPilot Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Answers scraped quiz questions through Gemini on /api/question
//! - Streams progress notices on /api/status/events
//! - Manages the API key and configuration on /api/credential and /api/config
//!
//! Access via: http://localhost:8046

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

mod api;
mod cli;
mod commands;
mod router;
mod state;
mod status_feed;

#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use quizpilot_core::modules::{config as core_config, get_data_dir, logger, paths};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = paths::get_log_dir().ok();
    let _log_guard = logger::init_logging(&cli.log_level, log_dir.as_deref())?;

    match cli.command {
        None => serve(None).await,
        Some(Commands::Serve { port }) => serve(port).await,
        Some(Commands::Ask { file, json }) => commands::handle_ask(&file, json).await,
        Some(Commands::Credential(cmd)) => commands::handle_credential_command(cmd).await,
        Some(Commands::Config(cmd)) => commands::handle_config_command(cmd),
    }
}

async fn serve(port_override: Option<u16>) -> Result<()> {
    let data_dir =
        get_data_dir().map_err(|e| anyhow::anyhow!("Failed to get data directory: {}", e))?;
    let config = core_config::load_config_from(&data_dir).unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {}", e);
        quizpilot_types::AppConfig::default()
    });

    let host: std::net::IpAddr = config.server.host.parse()?;
    let port = port_override.unwrap_or(config.server.port);

    info!("QuizPilot Server starting on port {}...", port);
    let state = AppState::new(&data_dir, config)?;
    let app = router::build_router(state);

    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);
    info!("API available at http://{}/api/", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
