pub mod participants;
pub mod tournaments;
pub mod wallets;

pub use participants::ParticipantRepo;
pub use tournaments::{TournamentFilter, TournamentRepo};
pub use wallets::WalletRepo;
