use domain::{has_capability, Action, Role};
use infra::models::TournamentRow;

use super::AuthUser;
use crate::error::ServiceError;

/// Check that the user's role grants the action.
pub fn require_capability(user: &AuthUser, action: Action) -> Result<(), ServiceError> {
    if has_capability(user.role, action) {
        return Ok(());
    }

    Err(ServiceError::Unauthorized(match action.required_role() {
        Role::Admin => format!(
            "Access denied: Administrator privileges required. Your current role is {}",
            user.role.as_str()
        ),
        Role::Host => format!(
            "Access denied: Host privileges required. Your current role is {}",
            user.role.as_str()
        ),
        Role::Player => "Access denied: You need to be registered as a player".to_string(),
    }))
}

/// Check that the user hosts this tournament. Admins can manage any tournament.
pub fn require_tournament_host(
    user: &AuthUser,
    tournament: &TournamentRow,
) -> Result<(), ServiceError> {
    require_capability(user, Action::ManageOwnTournament)?;

    if user.role == Role::Admin || tournament.host_id == user.id {
        return Ok(());
    }

    Err(ServiceError::Unauthorized(
        "Access denied: Only the host of this tournament can manage it".to_string(),
    ))
}
