use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Platform roles, ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player,
    Host,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Host => "host",
            Role::Admin => "admin",
        }
    }

    /// Highest-priority role among those granted (admin > host > player).
    pub fn highest<I>(roles: I) -> Option<Role>
    where
        I: IntoIterator<Item = Role>,
    {
        roles.into_iter().max()
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Role::Player),
            "host" => Ok(Role::Host),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    BrowseTournaments,
    JoinTournament,
    LeaveTournament,
    CreateTournament,
    /// Host-side controls on a tournament the user created (party code).
    ManageOwnTournament,
    ManageHosts,
}

impl Action {
    pub fn required_role(&self) -> Role {
        match self {
            Action::BrowseTournaments | Action::JoinTournament | Action::LeaveTournament => {
                Role::Player
            }
            Action::CreateTournament | Action::ManageOwnTournament => Role::Host,
            Action::ManageHosts => Role::Admin,
        }
    }
}

/// Admin carries host permissions, host carries player permissions.
pub fn has_role(user_role: Role, required: Role) -> bool {
    user_role >= required
}

pub fn has_capability(role: Role, action: Action) -> bool {
    has_role(role, action.required_role())
}
