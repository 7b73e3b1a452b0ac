use api::config::{load_tournament_seed, AppConfig};
use std::collections::HashMap;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults_when_unset() {
    let config = AppConfig::from_lookup(lookup(&[]));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.tick_interval, Duration::from_secs(1));
    assert_eq!(config.event_channel_capacity, 100);
    assert!(config.tournaments_seed_file.is_none());
}

#[test]
fn test_values_are_read_and_invalid_ones_fall_back() {
    let config = AppConfig::from_lookup(lookup(&[
        ("TICK_INTERVAL_MS", "250"),
        ("EVENT_CHANNEL_CAPACITY", "16"),
        ("TOURNAMENTS_SEED_FILE", "seed/tournaments.json"),
    ]));
    assert_eq!(config.tick_interval, Duration::from_millis(250));
    assert_eq!(config.event_channel_capacity, 16);
    assert_eq!(
        config.tournaments_seed_file.as_deref(),
        Some(std::path::Path::new("seed/tournaments.json"))
    );

    let config = AppConfig::from_lookup(lookup(&[
        ("TICK_INTERVAL_MS", "0"),
        ("EVENT_CHANNEL_CAPACITY", "lots"),
        ("TOURNAMENTS_SEED_FILE", "  "),
    ]));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_tournament_seed() {
    let path = std::env::temp_dir().join(format!("seed-{}.json", uuid::Uuid::new_v4()));
    let seed = serde_json::json!([{
        "id": "6f1c2a51-5b7e-4a43-9d53-3f1f0a6f1a11",
        "host_id": "0b8a6a57-2b4c-4e0d-8c8f-8f7b3c1d2e3f",
        "name": "Seeded Cup",
        "platform": "pc",
        "region": "kr",
        "match_start_time": "2025-06-01T20:00:00Z",
        "joining_fee": 25,
        "capacity": 32,
        "created_at": "2025-05-30T10:00:00Z"
    }]);
    std::fs::write(&path, seed.to_string()).unwrap();

    let rows = load_tournament_seed(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Seeded Cup");

    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_tournament_seed(&path).is_err());

    std::fs::remove_file(&path).unwrap();
    assert!(load_tournament_seed(&path).is_err());
}
