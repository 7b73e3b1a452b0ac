use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{RepoError, Result};
use crate::models::ParticipantRow;

/// Tournament membership keyed by (tournament, user). A user appears at
/// most once per tournament.
#[derive(Clone, Default)]
pub struct ParticipantRepo {
    rows: Arc<RwLock<HashMap<(Uuid, Uuid), ParticipantRow>>>,
}

impl ParticipantRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn join(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ParticipantRow> {
        let mut rows = self.rows.write();
        if rows.contains_key(&(tournament_id, user_id)) {
            return Err(RepoError::AlreadyJoined);
        }

        let row = ParticipantRow {
            tournament_id,
            user_id,
            joined_at: now,
        };
        rows.insert((tournament_id, user_id), row.clone());
        Ok(row)
    }

    pub async fn leave(&self, tournament_id: Uuid, user_id: Uuid) -> Result<ParticipantRow> {
        self.rows
            .write()
            .remove(&(tournament_id, user_id))
            .ok_or(RepoError::NotParticipant)
    }

    pub async fn is_participant(&self, tournament_id: Uuid, user_id: Uuid) -> bool {
        self.rows.read().contains_key(&(tournament_id, user_id))
    }

    pub async fn get_by_tournament(&self, tournament_id: Uuid) -> Vec<ParticipantRow> {
        let mut rows: Vec<ParticipantRow> = self
            .rows
            .read()
            .values()
            .filter(|row| row.tournament_id == tournament_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.joined_at);
        rows
    }

    /// Ids of the tournaments a user has joined, most recent first.
    pub async fn get_user_tournament_ids(&self, user_id: Uuid) -> Vec<Uuid> {
        let mut rows: Vec<ParticipantRow> = self
            .rows
            .read()
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        rows.into_iter().map(|row| row.tournament_id).collect()
    }
}
