use chrono::{DateTime, Utc};
use domain::{evaluate, LifecycleState};
use infra::repos::TournamentFilter;
use std::collections::HashMap;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::events::TournamentEvent;
use crate::AppState;

/// Polls every stored tournament and publishes a `LifecycleChanged` event
/// whenever its status, countdown phase or party-code window moves on.
pub struct LifecycleService {
    state: AppState,
    interval: Interval,
    last_seen: HashMap<Uuid, LifecycleState>,
}

impl LifecycleService {
    pub fn new(state: AppState) -> Self {
        let mut interval = interval(state.config().tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            state,
            interval,
            last_seen: HashMap::new(),
        }
    }

    /// Start the background lifecycle service
    pub async fn run(&mut self) {
        info!(
            tick_ms = self.state.config().tick_interval.as_millis() as u64,
            "Starting tournament lifecycle service"
        );

        loop {
            self.interval.tick().await;
            let now = self.state.now();
            self.process_tick(now).await;
        }
    }

    /// Evaluate all tournaments at `now`. Returns how many changed state.
    pub async fn process_tick(&mut self, now: DateTime<Utc>) -> usize {
        let tournaments = self
            .state
            .tournaments
            .list(TournamentFilter::default(), now)
            .await;

        let mut changed = 0;
        for tournament in &tournaments {
            let current = evaluate(now, &tournament.timestamps()).state();
            let previous = self.last_seen.insert(tournament.id, current);
            if previous == Some(current) {
                continue;
            }

            debug!(
                tournament_id = %tournament.id,
                status = current.status.as_str(),
                phase = current.phase.as_str(),
                "Tournament lifecycle changed"
            );
            self.state.events().publish(TournamentEvent::LifecycleChanged {
                tournament_id: tournament.id,
                state: current,
                previous,
            });
            changed += 1;
        }

        // Forget tournaments that are no longer stored
        if self.last_seen.len() > tournaments.len() {
            self.last_seen
                .retain(|id, _| tournaments.iter().any(|t| t.id == *id));
        }

        changed
    }
}

/// Spawn the lifecycle service as a background task
pub fn spawn_lifecycle_service(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut service = LifecycleService::new(state);
        service.run().await;
    })
}
