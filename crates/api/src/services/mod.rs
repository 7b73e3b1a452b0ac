pub mod lifecycle_service;
pub mod tournament_service;

pub use lifecycle_service::{spawn_lifecycle_service, LifecycleService};
pub use tournament_service::{
    create_tournament, host_view, join_tournament, leave_tournament, participant_view,
    set_party_code, JoinOutcome, LeaveOutcome,
};
