use anyhow::{Context, Result};
use infra::models::TournamentRow;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub tick_interval: Duration,
    pub event_channel_capacity: usize,
    pub tournaments_seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            tournaments_seed_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing, unparsable and zero values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            tick_interval: Duration::from_millis(
                lookup("TICK_INTERVAL_MS")
                    .and_then(|v| v.trim().parse().ok())
                    .filter(|ms: &u64| *ms > 0)
                    .unwrap_or(DEFAULT_TICK_INTERVAL_MS),
            ),
            event_channel_capacity: lookup("EVENT_CHANNEL_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(DEFAULT_EVENT_CHANNEL_CAPACITY),
            tournaments_seed_file: lookup("TOURNAMENTS_SEED_FILE")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Read a JSON array of tournament records.
pub fn load_tournament_seed(path: &Path) -> Result<Vec<TournamentRow>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let rows: Vec<TournamentRow> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid tournament seed file {}", path.display()))?;
    Ok(rows)
}
