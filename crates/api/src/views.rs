use chrono::{DateTime, Utc};
use domain::lifecycle::{describe_time_until, host_party_code_message, participant_party_code_message};
use domain::prize::distributable_pool;
use domain::{
    compute_breakdown, compute_prize_split, evaluate, evaluate_leave, LeaveDecision,
    LifecycleSnapshot, Platform, PrizeBreakdown, PrizeSplit, Region, TournamentStatus,
};
use infra::models::{ParticipantRow, TournamentRow};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ServiceError;

/// What a player sees. The party code is only present once
/// `lifecycle.can_view_party_code` holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantTournamentView {
    pub id: Uuid,
    pub name: String,
    pub game: String,
    pub platform: Platform,
    pub region: Region,
    pub match_start_time: DateTime<Utc>,
    pub party_join_time: DateTime<Utc>,
    pub joining_fee: i64,
    pub capacity: i64,
    pub current_players: i64,
    pub status: TournamentStatus,
    pub status_label: &'static str,
    pub time_until: String,
    pub lifecycle: LifecycleSnapshot,
    pub prize_pool: i64,
    pub prize_split: PrizeSplit,
    pub is_participant: bool,
    pub party_code_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_code: Option<String>,
    /// Outcome a leave request would have right now, for joined players.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave: Option<LeaveDecision>,
}

impl ParticipantTournamentView {
    pub fn build(
        row: &TournamentRow,
        is_participant: bool,
        now: DateTime<Utc>,
    ) -> Result<Self, ServiceError> {
        let timestamps = row.timestamps();
        let lifecycle = evaluate(now, &timestamps);
        let prize_split =
            compute_prize_split(row.joining_fee, row.current_players, &row.prize_shares()?)?;

        let party_code = if lifecycle.can_view_party_code {
            row.party_code.clone()
        } else {
            None
        };
        let leave = if is_participant {
            Some(evaluate_leave(row.match_start_time, now, row.joining_fee)?)
        } else {
            None
        };

        Ok(Self {
            id: row.id,
            name: row.name.clone(),
            game: row.game.clone(),
            platform: row.platform,
            region: row.region,
            match_start_time: timestamps.match_start_time,
            party_join_time: timestamps.party_join_time,
            joining_fee: row.joining_fee,
            capacity: row.capacity,
            current_players: row.current_players,
            status: lifecycle.status,
            status_label: lifecycle.status.label(),
            time_until: describe_time_until(timestamps.match_start_time, now),
            prize_pool: distributable_pool(row.joining_fee, row.current_players)?,
            prize_split,
            is_participant,
            party_code_message: participant_party_code_message(timestamps.party_join_time, now),
            party_code,
            leave,
            lifecycle,
        })
    }
}

/// What the host sees for a tournament they run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostTournamentView {
    pub id: Uuid,
    pub name: String,
    pub platform: Platform,
    pub region: Region,
    pub match_start_time: DateTime<Utc>,
    pub party_join_time: DateTime<Utc>,
    pub match_result_time: Option<DateTime<Utc>>,
    pub joining_fee: i64,
    pub capacity: i64,
    pub current_players: i64,
    pub status: TournamentStatus,
    pub status_label: &'static str,
    pub lifecycle: LifecycleSnapshot,
    pub breakdown: PrizeBreakdown,
    pub party_code: Option<String>,
    pub party_code_message: String,
    pub participants: Vec<ParticipantRow>,
}

impl HostTournamentView {
    pub fn build(
        row: &TournamentRow,
        participants: Vec<ParticipantRow>,
        now: DateTime<Utc>,
    ) -> Result<Self, ServiceError> {
        let timestamps = row.timestamps();
        let lifecycle = evaluate(now, &timestamps);
        let breakdown = compute_breakdown(
            row.joining_fee,
            row.current_players,
            row.host_share()?,
            &row.prize_shares()?,
        )?;

        Ok(Self {
            id: row.id,
            name: row.name.clone(),
            platform: row.platform,
            region: row.region,
            match_start_time: timestamps.match_start_time,
            party_join_time: timestamps.party_join_time,
            match_result_time: timestamps.match_result_time,
            joining_fee: row.joining_fee,
            capacity: row.capacity,
            current_players: row.current_players,
            status: lifecycle.status,
            status_label: lifecycle.status.label(),
            breakdown,
            party_code: row.party_code.clone(),
            party_code_message: host_party_code_message(timestamps.party_join_time, now),
            participants,
            lifecycle,
        })
    }
}
