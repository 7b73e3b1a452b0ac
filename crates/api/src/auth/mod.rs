pub mod permissions;

pub use permissions::{require_capability, require_tournament_host};

use domain::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller of a service operation, as resolved by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    /// Resolve a user holding several role grants to the most privileged one.
    pub fn from_roles<I>(id: Uuid, roles: I) -> Option<Self>
    where
        I: IntoIterator<Item = Role>,
    {
        Role::highest(roles).map(|role| Self { id, role })
    }
}
