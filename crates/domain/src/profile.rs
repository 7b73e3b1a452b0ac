//! Player profile completeness, checked before a player may join.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAccount {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub date_of_birth: Option<String>,
    /// Payout address for prize transfers.
    pub vpa: Option<String>,
    pub game_account: Option<GameAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    pub basic: Vec<&'static str>,
    pub game: Vec<&'static str>,
}

impl MissingFields {
    pub fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.game.is_empty()
    }
}

const GAME_FIELDS: [&str; 4] = ["name", "tag", "platform", "region"];

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

pub fn missing_fields(profile: Option<&PlayerProfile>) -> MissingFields {
    let Some(profile) = profile else {
        return MissingFields {
            basic: vec!["display_name", "username", "date_of_birth", "vpa"],
            game: GAME_FIELDS.to_vec(),
        };
    };

    let basic = [
        ("display_name", &profile.display_name),
        ("username", &profile.username),
        ("date_of_birth", &profile.date_of_birth),
        ("vpa", &profile.vpa),
    ]
    .into_iter()
    .filter(|(_, value)| !present(value))
    .map(|(name, _)| name)
    .collect();

    let game = match &profile.game_account {
        None => GAME_FIELDS.to_vec(),
        Some(account) => [
            ("name", &account.name),
            ("tag", &account.tag),
            ("platform", &account.platform),
            ("region", &account.region),
        ]
        .into_iter()
        .filter(|(_, value)| !present(value))
        .map(|(name, _)| name)
        .collect(),
    };

    MissingFields { basic, game }
}

pub fn is_basic_profile_complete(profile: Option<&PlayerProfile>) -> bool {
    missing_fields(profile).basic.is_empty()
}

/// A game profile only counts as complete on top of a complete basic one.
pub fn is_game_profile_complete(profile: Option<&PlayerProfile>) -> bool {
    missing_fields(profile).is_empty()
}

pub fn completion_message(profile: Option<&PlayerProfile>) -> &'static str {
    let missing = missing_fields(profile);
    match (missing.basic.is_empty(), missing.game.is_empty()) {
        (false, false) => {
            "Please complete your basic profile and game information to join tournaments."
        }
        (false, true) => "Please complete your basic profile information to join tournaments.",
        (true, false) => "Please complete your game profile information to join tournaments.",
        (true, true) => "Your profile is complete!",
    }
}
