use futures_util::StreamExt;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::config::{load_tournament_seed, AppConfig};
use api::services::spawn_lifecycle_service;
use api::state::AppState;
use domain::SystemClock;
use infra::repos::TournamentRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let tournaments = match &config.tournaments_seed_file {
        Some(path) => {
            let rows = load_tournament_seed(path)?;
            tracing::info!("Loaded {} tournaments from {}", rows.len(), path.display());
            TournamentRepo::with_rows(rows)
        }
        None => TournamentRepo::new(),
    };

    let state = AppState::with_tournaments(config, Arc::new(SystemClock), tournaments);

    // Relay events to the log until a transport is attached
    let mut events = state.events().stream();
    let _event_log_handle = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            match serde_json::to_string(&event) {
                Ok(json) => tracing::info!(event = %json, "Tournament event"),
                Err(e) => tracing::warn!("Failed to encode event: {}", e),
            }
        }
    });

    let _lifecycle_handle = spawn_lifecycle_service(state.clone());
    tracing::info!("Tournament lifecycle service started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
