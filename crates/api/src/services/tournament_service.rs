use chrono::{DateTime, Utc};
use domain::lifecycle::host_party_code_message;
use domain::profile::{completion_message, is_game_profile_complete};
use domain::{
    can_set_party_code, settle_leave, validate_tournament_draft, Action, LeaveEvent,
    PlayerProfile, TournamentDraft, TournamentStatus,
};
use infra::models::{TournamentRow, TransactionKind};
use infra::RepoError;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{require_capability, require_tournament_host, AuthUser};
use crate::error::ServiceError;
use crate::events::TournamentEvent;
use crate::state::AppState;
use crate::views::{HostTournamentView, ParticipantTournamentView};

/// Returned to the joining player, so the tournament goes through the
/// participant view and its party-code gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinOutcome {
    pub tournament: ParticipantTournamentView,
    pub charged: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveOutcome {
    pub tournament: ParticipantTournamentView,
    pub refund_amount: i64,
    pub balance: i64,
}

async fn get_tournament(state: &AppState, tournament_id: Uuid) -> Result<TournamentRow, ServiceError> {
    state
        .tournaments
        .get(tournament_id)
        .await
        .ok_or(ServiceError::NotFound(tournament_id))
}

/// Validate a draft against the current time and store it for the host.
pub async fn create_tournament(
    state: &AppState,
    user: &AuthUser,
    draft: &TournamentDraft,
) -> Result<TournamentRow, ServiceError> {
    require_capability(user, Action::CreateTournament)?;

    // Re-validated at submission; the form may have been open for a while
    let now = state.now();
    let tournament = validate_tournament_draft(draft, now)?;
    let row = state.tournaments.create(user.id, tournament, now).await;

    info!(
        tournament_id = %row.id,
        host_id = %user.id,
        match_start_time = %row.match_start_time,
        "Tournament created"
    );
    Ok(row)
}

pub async fn join_tournament(
    state: &AppState,
    user: &AuthUser,
    profile: Option<&PlayerProfile>,
    tournament_id: Uuid,
) -> Result<JoinOutcome, ServiceError> {
    require_capability(user, Action::JoinTournament)?;

    if !is_game_profile_complete(profile) {
        return Err(ServiceError::ProfileIncomplete(
            completion_message(profile).to_string(),
        ));
    }

    let tournament = get_tournament(state, tournament_id).await?;
    let now = state.now();

    let status = tournament.status(now);
    if status != TournamentStatus::Upcoming {
        return Err(ServiceError::NotJoinable(status));
    }
    if tournament.is_full() {
        return Err(RepoError::TournamentFull.into());
    }
    if state.participants.is_participant(tournament_id, user.id).await {
        return Err(RepoError::AlreadyJoined.into());
    }

    let fee = tournament.joining_fee;
    if fee > 0 {
        state
            .wallets
            .debit(user.id, fee, TransactionKind::EntryFee, Some(tournament_id), now)
            .await?;
    }

    let row = match take_seat(state, tournament_id, user.id, now).await {
        Ok(row) => row,
        Err(e) => {
            if fee > 0 {
                refund_entry_fee(state, user.id, fee, tournament_id, now).await;
            }
            return Err(e.into());
        }
    };

    let balance = state.wallets.balance(user.id).await;
    if fee > 0 {
        state.events().publish(TournamentEvent::WalletChanged {
            user_id: user.id,
            balance,
        });
    }
    state
        .events()
        .publish(TournamentEvent::ParticipantCountChanged {
            tournament_id,
            current_players: row.current_players,
        });

    info!(
        tournament_id = %tournament_id,
        user_id = %user.id,
        current_players = row.current_players,
        "Player joined tournament"
    );

    Ok(JoinOutcome {
        tournament: ParticipantTournamentView::build(&row, true, now)?,
        charged: fee,
        balance,
    })
}

/// Record the membership and the seat together, undoing the membership if
/// the tournament filled up in the meantime.
async fn take_seat(
    state: &AppState,
    tournament_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<TournamentRow, RepoError> {
    state.participants.join(tournament_id, user_id, now).await?;

    match state.tournaments.add_player(tournament_id).await {
        Ok(row) => Ok(row),
        Err(e) => {
            if let Err(undo) = state.participants.leave(tournament_id, user_id).await {
                warn!(
                    tournament_id = %tournament_id,
                    user_id = %user_id,
                    "Failed to undo membership: {}",
                    undo
                );
            }
            Err(e)
        }
    }
}

async fn refund_entry_fee(
    state: &AppState,
    user_id: Uuid,
    fee: i64,
    tournament_id: Uuid,
    now: DateTime<Utc>,
) {
    if let Err(e) = state
        .wallets
        .credit(user_id, fee, TransactionKind::Refund, Some(tournament_id), now)
        .await
    {
        warn!(
            tournament_id = %tournament_id,
            user_id = %user_id,
            "Failed to roll back entry fee: {}",
            e
        );
    }
}

pub async fn leave_tournament(
    state: &AppState,
    user: &AuthUser,
    tournament_id: Uuid,
) -> Result<LeaveOutcome, ServiceError> {
    require_capability(user, Action::LeaveTournament)?;

    let tournament = get_tournament(state, tournament_id).await?;
    let is_participant = state.participants.is_participant(tournament_id, user.id).await;
    let now = state.now();

    let settlement = settle_leave(
        is_participant,
        tournament.current_players,
        tournament.match_start_time,
        now,
        tournament.joining_fee,
    )?;

    let decision = settlement.decision;
    if !decision.allowed {
        return Err(ServiceError::LeaveBlocked {
            warning: decision.warning.unwrap_or_default(),
            minutes_until_start: decision.minutes_until_start,
        });
    }

    state.participants.leave(tournament_id, user.id).await?;
    let row = state.tournaments.remove_player(tournament_id).await?;

    if decision.refund_amount > 0 {
        state
            .wallets
            .credit(
                user.id,
                decision.refund_amount,
                TransactionKind::Refund,
                Some(tournament_id),
                now,
            )
            .await?;
    }
    let balance = state.wallets.balance(user.id).await;

    for event in settlement.events {
        let event = match event {
            LeaveEvent::WalletChanged => TournamentEvent::WalletChanged {
                user_id: user.id,
                balance,
            },
            LeaveEvent::ParticipantCountChanged => TournamentEvent::ParticipantCountChanged {
                tournament_id,
                current_players: row.current_players,
            },
        };
        state.events().publish(event);
    }

    info!(
        tournament_id = %tournament_id,
        user_id = %user.id,
        refund = decision.refund_amount,
        "Player left tournament"
    );

    Ok(LeaveOutcome {
        tournament: ParticipantTournamentView::build(&row, false, now)?,
        refund_amount: decision.refund_amount,
        balance,
    })
}

pub async fn set_party_code(
    state: &AppState,
    user: &AuthUser,
    tournament_id: Uuid,
    party_code: &str,
) -> Result<TournamentRow, ServiceError> {
    let tournament = get_tournament(state, tournament_id).await?;
    require_tournament_host(user, &tournament)?;

    let party_code = party_code.trim();
    if party_code.is_empty() {
        return Err(ServiceError::BadRequest(
            "Party code cannot be empty".to_string(),
        ));
    }

    let now = state.now();
    let party_join_time = tournament.timestamps().party_join_time;
    if !can_set_party_code(party_join_time, now) {
        return Err(ServiceError::PartyCodeWindowClosed(host_party_code_message(
            party_join_time,
            now,
        )));
    }

    let row = state
        .tournaments
        .set_party_code(tournament_id, party_code.to_string())
        .await?;

    info!(tournament_id = %tournament_id, host_id = %user.id, "Party code set");
    Ok(row)
}

pub async fn participant_view(
    state: &AppState,
    user: &AuthUser,
    tournament_id: Uuid,
) -> Result<ParticipantTournamentView, ServiceError> {
    require_capability(user, Action::BrowseTournaments)?;

    let tournament = get_tournament(state, tournament_id).await?;
    let is_participant = state.participants.is_participant(tournament_id, user.id).await;
    ParticipantTournamentView::build(&tournament, is_participant, state.now())
}

pub async fn host_view(
    state: &AppState,
    user: &AuthUser,
    tournament_id: Uuid,
) -> Result<HostTournamentView, ServiceError> {
    let tournament = get_tournament(state, tournament_id).await?;
    require_tournament_host(user, &tournament)?;

    let participants = state.participants.get_by_tournament(tournament_id).await;
    HostTournamentView::build(&tournament, participants, state.now())
}
