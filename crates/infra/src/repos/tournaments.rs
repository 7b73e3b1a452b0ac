use chrono::{DateTime, Utc};
use domain::{NormalizedTournament, Platform, Region, TournamentStatus};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{RepoError, Result};
use crate::models::TournamentRow;

#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    pub host_id: Option<Uuid>,
    pub platform: Option<Platform>,
    pub region: Option<Region>,
    pub status: Option<TournamentStatus>,
}

impl TournamentFilter {
    fn matches(&self, row: &TournamentRow, now: DateTime<Utc>) -> bool {
        self.host_id.is_none_or(|host_id| row.host_id == host_id)
            && self.platform.is_none_or(|platform| row.platform == platform)
            && self.region.is_none_or(|region| row.region == region)
            && self.status.is_none_or(|status| row.status(now) == status)
    }
}

/// In-memory tournament store. Clones share the same rows.
#[derive(Clone, Default)]
pub struct TournamentRepo {
    rows: Arc<RwLock<HashMap<Uuid, TournamentRow>>>,
}

impl TournamentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = TournamentRow>) -> Self {
        let rows = rows.into_iter().map(|row| (row.id, row)).collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Persist a validated tournament for the given host.
    pub async fn create(
        &self,
        host_id: Uuid,
        tournament: NormalizedTournament,
        now: DateTime<Utc>,
    ) -> TournamentRow {
        let row = TournamentRow::new(host_id, tournament, now);
        self.rows.write().insert(row.id, row.clone());
        tracing::debug!(tournament_id = %row.id, host_id = %host_id, "Tournament stored");
        row
    }

    pub async fn get(&self, id: Uuid) -> Option<TournamentRow> {
        self.rows.read().get(&id).cloned()
    }

    /// Tournaments matching the filter, soonest match first.
    pub async fn list(&self, filter: TournamentFilter, now: DateTime<Utc>) -> Vec<TournamentRow> {
        let mut rows: Vec<TournamentRow> = self
            .rows
            .read()
            .values()
            .filter(|row| filter.matches(row, now))
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.match_start_time, row.created_at));
        rows
    }

    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Vec<TournamentRow> {
        if ids.is_empty() {
            return Vec::new();
        }

        let rows = self.rows.read();
        ids.iter().filter_map(|id| rows.get(id).cloned()).collect()
    }

    pub async fn set_party_code(&self, id: Uuid, party_code: String) -> Result<TournamentRow> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id).ok_or(RepoError::TournamentNotFound(id))?;
        row.party_code = Some(party_code);
        Ok(row.clone())
    }

    /// Take a seat, failing when the tournament is at capacity.
    pub async fn add_player(&self, id: Uuid) -> Result<TournamentRow> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id).ok_or(RepoError::TournamentNotFound(id))?;
        if row.is_full() {
            return Err(RepoError::TournamentFull);
        }
        row.current_players += 1;
        Ok(row.clone())
    }

    pub async fn remove_player(&self, id: Uuid) -> Result<TournamentRow> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id).ok_or(RepoError::TournamentNotFound(id))?;
        if row.current_players < 1 {
            return Err(RepoError::NoActivePlayers);
        }
        row.current_players -= 1;
        Ok(row.clone())
    }
}
