use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepoError {
    #[error("tournament {0} not found")]
    TournamentNotFound(Uuid),

    #[error("user has already joined this tournament")]
    AlreadyJoined,

    #[error("user is not a participant of this tournament")]
    NotParticipant,

    #[error("tournament is full")]
    TournamentFull,

    #[error("tournament has no active players")]
    NoActivePlayers,

    #[error("insufficient balance: {required} required, {available} available")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, RepoError>;
