use chrono::{DateTime, Utc};
use domain::{
    derive_status, NormalizedTournament, Platform, PrizeShares, Region, Share, ShareError,
    TournamentStatus, TournamentTimestamps,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_GAME: &str = "valorant";

fn default_game() -> String {
    DEFAULT_GAME.to_string()
}

/// Persisted tournament record. Percentages are stored as fractions of one;
/// older records may hold whole percents or nulls, so always read them
/// through [`TournamentRow::prize_shares`] and [`TournamentRow::host_share`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRow {
    pub id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    #[serde(default = "default_game")]
    pub game: String,
    pub platform: Platform,
    pub region: Region,
    pub match_start_time: DateTime<Utc>,
    #[serde(default)]
    pub party_join_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub match_result_time: Option<DateTime<Utc>>,
    pub joining_fee: i64,
    pub capacity: i64,
    #[serde(default)]
    pub host_percentage: Option<f64>,
    #[serde(default)]
    pub prize_first_pct: Option<f64>,
    #[serde(default)]
    pub prize_second_pct: Option<f64>,
    #[serde(default)]
    pub prize_third_pct: Option<f64>,
    #[serde(default)]
    pub current_players: i64,
    #[serde(default)]
    pub party_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TournamentRow {
    pub fn new(host_id: Uuid, tournament: NormalizedTournament, created_at: DateTime<Utc>) -> Self {
        let shares = tournament.prize_shares;
        Self {
            id: Uuid::new_v4(),
            host_id,
            name: tournament.name,
            game: default_game(),
            platform: tournament.platform,
            region: tournament.region,
            match_start_time: tournament.match_start_time,
            party_join_time: Some(tournament.party_join_time),
            match_result_time: tournament.match_result_time,
            joining_fee: tournament.joining_fee,
            capacity: tournament.capacity,
            host_percentage: Some(tournament.host_share.fraction()),
            prize_first_pct: Some(shares.first.fraction()),
            prize_second_pct: Some(shares.second.fraction()),
            prize_third_pct: Some(shares.third.fraction()),
            current_players: 0,
            party_code: None,
            created_at,
        }
    }

    /// Party-join time is always re-derived from the match start.
    pub fn timestamps(&self) -> TournamentTimestamps {
        let timestamps =
            TournamentTimestamps::from_match_start(self.match_start_time, self.match_result_time);
        if let Some(stored) = self.party_join_time {
            if stored != timestamps.party_join_time {
                tracing::warn!(
                    tournament_id = %self.id,
                    stored = %stored,
                    derived = %timestamps.party_join_time,
                    "Stored party join time disagrees with match start, using derived value"
                );
            }
        }
        timestamps
    }

    pub fn prize_shares(&self) -> Result<PrizeShares, ShareError> {
        PrizeShares::from_stored(
            self.prize_first_pct,
            self.prize_second_pct,
            self.prize_third_pct,
        )
    }

    pub fn host_share(&self) -> Result<Share, ShareError> {
        self.host_percentage
            .map(Share::host_from_stored)
            .unwrap_or(Ok(Share::ZERO))
    }

    pub fn status(&self, now: DateTime<Utc>) -> TournamentStatus {
        derive_status(self.match_start_time, now)
    }

    pub fn is_full(&self) -> bool {
        self.current_players >= self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    EntryFee,
    Refund,
    TopUp,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::EntryFee => "entry_fee",
            TransactionKind::Refund => "refund",
            TransactionKind::TopUp => "top_up",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry_fee" => Ok(TransactionKind::EntryFee),
            "refund" => Ok(TransactionKind::Refund),
            "top_up" => Ok(TransactionKind::TopUp),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

/// One balance movement. Debits carry a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount: i64,
    pub tournament_id: Option<Uuid>,
    pub balance_after: i64,
    pub created_at: DateTime<Utc>,
}
