use thiserror::Error;

/// Caller bugs: the engine was handed inputs that a correct caller never
/// produces. Distinct from [`crate::validator::FieldErrors`], which describe
/// bad user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreconditionError {
    #[error("joining fee cannot be negative (got {0})")]
    NegativeJoiningFee(i64),

    #[error("player count cannot be negative (got {0})")]
    NegativePlayerCount(i64),

    #[error("leave requested for a user who is not a participant")]
    NotParticipant,

    #[error("leave requested on a tournament with no active players")]
    NoActivePlayers,

    #[error("prize pool overflow for fee {fee} and {players} players")]
    PoolOverflow { fee: i64, players: i64 },
}

/// Stored or supplied percentage data that cannot be normalized to a
/// fraction of one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareError {
    #[error("share must be a finite number")]
    NotFinite,

    #[error("share out of range: {0}")]
    OutOfRange(f64),

    #[error("prize shares add up to {0:.2}%, which exceeds 100%")]
    ExceedsWhole(f64),

    #[error("host share of {0:.2}% exceeds the 15% maximum")]
    HostCutTooLarge(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    #[error("invalid timestamp '{0}'")]
    Invalid(String),
}
