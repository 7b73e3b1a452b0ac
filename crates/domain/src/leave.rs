//! Leave/refund policy for joined tournaments.
//!
//! Leaving is blocked once the match is at most 15 minutes away. Before
//! that, the participant gets half the joining fee back (floored).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PreconditionError;

/// Leave is blocked at or below this many minutes before the match.
/// Independent from the creation lead time even though both are 15 today.
pub const LEAVE_PENALTY_THRESHOLD_MINUTES: i64 = 15;
pub const REFUND_PERCENT: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDecision {
    pub allowed: bool,
    pub refund_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Whole minutes until the match, clamped at zero.
    pub minutes_until_start: i64,
}

/// Notifications dependent views need after a successful leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveEvent {
    WalletChanged,
    ParticipantCountChanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSettlement {
    pub decision: LeaveDecision,
    /// Player count after the leave is applied.
    pub current_players: i64,
    pub events: Vec<LeaveEvent>,
}

fn penalty_warning(minutes_until_start: i64) -> String {
    format!(
        "You cannot leave this tournament now. It starts in {minutes_until_start} minutes. \
         If you do not join the match you will be issued a penalty that may affect your \
         future tournament participation."
    )
}

// Widened so any non-negative fee is safe; the result never exceeds the fee.
fn refund_for(joining_fee: i64) -> i64 {
    (joining_fee as i128 * REFUND_PERCENT as i128 / 100) as i64
}

pub fn evaluate_leave(
    match_start_time: DateTime<Utc>,
    now: DateTime<Utc>,
    joining_fee: i64,
) -> Result<LeaveDecision, PreconditionError> {
    if joining_fee < 0 {
        return Err(PreconditionError::NegativeJoiningFee(joining_fee));
    }

    let remaining = match_start_time - now;
    let minutes_until_start = remaining.num_minutes().max(0);

    if remaining <= Duration::minutes(LEAVE_PENALTY_THRESHOLD_MINUTES) {
        return Ok(LeaveDecision {
            allowed: false,
            refund_amount: 0,
            warning: Some(penalty_warning(minutes_until_start)),
            minutes_until_start,
        });
    }

    Ok(LeaveDecision {
        allowed: true,
        refund_amount: refund_for(joining_fee),
        warning: None,
        minutes_until_start,
    })
}

/// Apply the policy to a membership the caller has already looked up.
pub fn settle_leave(
    is_participant: bool,
    current_players: i64,
    match_start_time: DateTime<Utc>,
    now: DateTime<Utc>,
    joining_fee: i64,
) -> Result<LeaveSettlement, PreconditionError> {
    if !is_participant {
        return Err(PreconditionError::NotParticipant);
    }
    if current_players < 1 {
        return Err(PreconditionError::NoActivePlayers);
    }

    let decision = evaluate_leave(match_start_time, now, joining_fee)?;
    if !decision.allowed {
        return Ok(LeaveSettlement {
            decision,
            current_players,
            events: Vec::new(),
        });
    }

    Ok(LeaveSettlement {
        decision,
        current_players: current_players - 1,
        events: vec![LeaveEvent::WalletChanged, LeaveEvent::ParticipantCountChanged],
    })
}
