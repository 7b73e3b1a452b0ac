#![allow(dead_code)]

use std::sync::Arc;

use api::auth::AuthUser;
use api::config::AppConfig;
use api::AppState;
use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{FixedClock, GameAccount, PlayerProfile, Role, TournamentDraft};
use uuid::Uuid;

pub fn start_of_test() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap()
}

/// App state driven by a manual clock set to `start_of_test()`.
pub fn test_state() -> (AppState, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(start_of_test()));
    let state = AppState::new(AppConfig::default(), clock.clone());
    (state, clock)
}

pub fn host() -> AuthUser {
    AuthUser::new(Uuid::new_v4(), Role::Host)
}

pub fn admin() -> AuthUser {
    AuthUser::new(Uuid::new_v4(), Role::Admin)
}

pub async fn funded_player(state: &AppState, balance: i64) -> AuthUser {
    let player = AuthUser::new(Uuid::new_v4(), Role::Player);
    if balance > 0 {
        state
            .wallets
            .top_up(player.id, balance, state.now())
            .await
            .expect("Failed to top up test wallet");
    }
    player
}

pub fn complete_profile() -> PlayerProfile {
    PlayerProfile {
        display_name: Some("Test Player".to_string()),
        username: Some("test_player".to_string()),
        date_of_birth: Some("2000-01-01".to_string()),
        vpa: Some("test@upi".to_string()),
        game_account: Some(GameAccount {
            name: Some("TestPlayer".to_string()),
            tag: Some("0001".to_string()),
            platform: Some("pc".to_string()),
            region: Some("eu".to_string()),
        }),
    }
}

pub fn draft(start_at: DateTime<Utc>, joining_fee: i64, capacity: i64) -> TournamentDraft {
    TournamentDraft {
        name: "Test Tournament".to_string(),
        match_start_time: Some(start_at.to_rfc3339()),
        match_result_time: None,
        joining_fee: Some(joining_fee),
        capacity: Some(capacity),
        host_percentage: Some(5.0),
        prize_first_pct: Some(50.0),
        prize_second_pct: Some(30.0),
        prize_third_pct: Some(20.0),
        platform: Some("pc".to_string()),
        region: Some("eu".to_string()),
    }
}

/// Create a tournament starting `starts_in` after the test clock's now.
pub async fn create_test_tournament(
    state: &AppState,
    host: &AuthUser,
    starts_in: Duration,
    joining_fee: i64,
    capacity: i64,
) -> Uuid {
    let row = api::services::create_tournament(
        state,
        host,
        &draft(state.now() + starts_in, joining_fee, capacity),
    )
    .await
    .expect("Failed to create test tournament");
    row.id
}
