use domain::{FieldErrors, PreconditionError, ShareError, TournamentStatus};
use infra::RepoError;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Validation(#[from] FieldErrors),

    #[error("{0}")]
    ProfileIncomplete(String),

    #[error("tournament {0} not found")]
    NotFound(Uuid),

    #[error("tournament is not open for joining (status: {0})")]
    NotJoinable(TournamentStatus),

    #[error("{warning}")]
    LeaveBlocked {
        warning: String,
        minutes_until_start: i64,
    },

    #[error("{0}")]
    PartyCodeWindowClosed(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("stored tournament data is invalid: {0}")]
    CorruptRecord(#[from] ShareError),
}

/// Wire shape for reporting a failed operation to a client.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub error: String,
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Unauthorized(_) => "unauthorized",
            ServiceError::Validation(_) => "validation_failed",
            ServiceError::ProfileIncomplete(_) => "profile_incomplete",
            ServiceError::NotFound(_) | ServiceError::Repo(RepoError::TournamentNotFound(_)) => {
                "not_found"
            }
            ServiceError::NotJoinable(_) => "not_joinable",
            ServiceError::LeaveBlocked { .. } => "leave_blocked",
            ServiceError::PartyCodeWindowClosed(_) => "party_code_window_closed",
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Repo(RepoError::AlreadyJoined) => "already_joined",
            ServiceError::Repo(RepoError::TournamentFull) => "tournament_full",
            ServiceError::Repo(RepoError::InsufficientBalance { .. }) => "insufficient_balance",
            ServiceError::Repo(RepoError::NotParticipant)
            | ServiceError::Precondition(PreconditionError::NotParticipant) => "not_participant",
            ServiceError::Repo(_)
            | ServiceError::Precondition(_)
            | ServiceError::CorruptRecord(_) => "internal",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            error: self.to_string(),
        }
    }
}
