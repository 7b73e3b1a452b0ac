pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod services;
pub mod state;
pub mod views;

pub use error::ServiceError;
pub use state::AppState;
