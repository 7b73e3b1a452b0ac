use chrono::{DateTime, Utc};
use domain::Clock;
use infra::repos::{ParticipantRepo, TournamentRepo, WalletRepo};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::events::EventBus;

#[derive(Clone)]
pub struct AppState {
    pub tournaments: TournamentRepo,
    pub participants: ParticipantRepo,
    pub wallets: WalletRepo,
    events: EventBus,
    clock: Arc<dyn Clock>,
    config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_tournaments(config, clock, TournamentRepo::new())
    }

    pub fn with_tournaments(
        config: AppConfig,
        clock: Arc<dyn Clock>,
        tournaments: TournamentRepo,
    ) -> Self {
        Self {
            tournaments,
            participants: ParticipantRepo::new(),
            wallets: WalletRepo::new(),
            events: EventBus::new(config.event_channel_capacity),
            clock,
            config,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
