//! Tournament decision engine: creation validation, prize math, time-gated
//! lifecycle state, the leave/refund policy and match result ranking.
//!
//! Everything in this crate is a pure function of its inputs. Callers supply
//! "now" explicitly (see [`clock::Clock`]) and own any persistence.

pub mod capability;
pub mod clock;
pub mod error;
pub mod leave;
pub mod lifecycle;
pub mod prize;
pub mod profile;
pub mod results;
pub mod validator;

pub use capability::{has_capability, has_role, Action, Role};
pub use clock::{parse_timestamp, Clock, FixedClock, SystemClock};
pub use error::{PreconditionError, ShareError, TimestampError};
pub use leave::{evaluate_leave, settle_leave, LeaveDecision, LeaveEvent, LeaveSettlement};
pub use lifecycle::{
    can_set_party_code, can_view_party_code, derive_countdown_phase, derive_status, evaluate,
    Countdown, CountdownPhase, LifecycleSnapshot, LifecycleState, PartyCodeWindow,
    TournamentStatus, TournamentTimestamps,
};
pub use prize::{
    compute_breakdown, compute_prize_split, PrizeBreakdown, PrizeShares, PrizeSplit, Share,
};
pub use profile::{GameAccount, MissingFields, PlayerProfile};
pub use results::{award_prizes, rank_results, PlayerResult, PrizeAward, RankedResult};
pub use validator::{
    validate_tournament_draft, DraftField, FieldError, FieldErrors, NormalizedTournament,
    Platform, Region, TournamentDraft,
};
