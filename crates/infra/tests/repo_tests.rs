use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{
    validate_tournament_draft, Platform, Region, ShareError, TournamentDraft, TournamentStatus,
};
use infra::models::{TournamentRow, TransactionKind};
use infra::repos::{ParticipantRepo, TournamentFilter, TournamentRepo, WalletRepo};
use infra::RepoError;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap()
}

fn normalized(start_in: Duration, capacity: i64, platform: &str) -> domain::NormalizedTournament {
    let draft = TournamentDraft {
        name: "Repo Cup".to_string(),
        match_start_time: Some((now() + start_in).to_rfc3339()),
        match_result_time: None,
        joining_fee: Some(100),
        capacity: Some(capacity),
        host_percentage: Some(5.0),
        prize_first_pct: Some(60.0),
        prize_second_pct: Some(25.0),
        prize_third_pct: Some(15.0),
        platform: Some(platform.to_string()),
        region: Some("eu".to_string()),
    };
    validate_tournament_draft(&draft, now()).unwrap()
}

#[tokio::test]
async fn test_create_stores_fractions_and_derived_party_join_time() {
    let repo = TournamentRepo::new();
    let host = Uuid::new_v4();
    let row = repo.create(host, normalized(Duration::hours(2), 16, "pc"), now()).await;

    assert_eq!(row.host_id, host);
    assert_eq!(row.current_players, 0);
    assert_eq!(row.prize_first_pct, Some(0.6));
    assert_eq!(row.host_percentage, Some(0.05));
    assert_eq!(
        row.party_join_time,
        Some(row.match_start_time - Duration::minutes(10))
    );
    assert_eq!(repo.get(row.id).await, Some(row.clone()));

    let shares = row.prize_shares().unwrap();
    assert_eq!(shares.first.basis_points(), 6_000);
    assert_eq!(row.host_share().unwrap().basis_points(), 500);
}

#[tokio::test]
async fn test_timestamps_rederive_party_join_time() {
    let repo = TournamentRepo::new();
    let mut row = repo
        .create(Uuid::new_v4(), normalized(Duration::hours(2), 16, "pc"), now())
        .await;
    row.party_join_time = Some(row.match_start_time - Duration::minutes(3));

    let timestamps = row.timestamps();
    assert_eq!(
        timestamps.party_join_time,
        row.match_start_time - Duration::minutes(10)
    );
}

#[test]
fn test_legacy_seed_record_reads_with_defaults() {
    let json = serde_json::json!({
        "id": "6f1c2a51-5b7e-4a43-9d53-3f1f0a6f1a11",
        "host_id": "0b8a6a57-2b4c-4e0d-8c8f-8f7b3c1d2e3f",
        "name": "Legacy Cup",
        "platform": "console",
        "region": "br",
        "match_start_time": "2025-06-01T20:00:00Z",
        "joining_fee": 40,
        "capacity": 8,
        "prize_first_pct": 50,
        "prize_second_pct": null,
        "prize_third_pct": 20,
        "created_at": "2025-05-30T10:00:00Z"
    });

    let row: TournamentRow = serde_json::from_value(json).unwrap();
    assert_eq!(row.game, "valorant");
    assert_eq!(row.platform, Platform::Console);
    assert_eq!(row.region, Region::Br);
    assert_eq!(row.current_players, 0);
    assert!(row.party_code.is_none());
    assert_eq!(row.prize_shares().unwrap(), domain::PrizeShares::default());
    assert_eq!(row.host_share().unwrap().basis_points(), 0);
    assert_eq!(row.status(now()), TournamentStatus::Upcoming);
}

#[test]
fn test_corrupt_host_percentage_is_rejected_on_read() {
    let json = serde_json::json!({
        "id": "2d0c7f4e-8a51-4c1e-9f0b-6a3e5d2c1b00",
        "host_id": "0b8a6a57-2b4c-4e0d-8c8f-8f7b3c1d2e3f",
        "name": "Greedy Cup",
        "platform": "pc",
        "region": "eu",
        "match_start_time": "2025-06-01T20:00:00Z",
        "joining_fee": 100,
        "capacity": 8,
        "host_percentage": 0.5,
        "created_at": "2025-05-30T10:00:00Z"
    });

    let row: TournamentRow = serde_json::from_value(json).unwrap();
    assert_eq!(row.host_share(), Err(ShareError::HostCutTooLarge(50.0)));

    let capped = TournamentRow {
        host_percentage: Some(15.0),
        ..row
    };
    assert_eq!(capped.host_share().unwrap().basis_points(), 1_500);
}

#[tokio::test]
async fn test_list_filters_and_orders_by_start() {
    let repo = TournamentRepo::new();
    let host = Uuid::new_v4();
    let later = repo.create(host, normalized(Duration::hours(5), 8, "pc"), now()).await;
    let sooner = repo.create(host, normalized(Duration::hours(1), 8, "pc"), now()).await;
    let console = repo
        .create(Uuid::new_v4(), normalized(Duration::hours(3), 8, "console"), now())
        .await;

    let all = repo.list(TournamentFilter::default(), now()).await;
    let ids: Vec<Uuid> = all.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![sooner.id, console.id, later.id]);

    let by_host = repo
        .list(
            TournamentFilter {
                host_id: Some(host),
                ..Default::default()
            },
            now(),
        )
        .await;
    assert_eq!(by_host.len(), 2);

    let by_platform = repo
        .list(
            TournamentFilter {
                platform: Some(Platform::Console),
                ..Default::default()
            },
            now(),
        )
        .await;
    assert_eq!(by_platform, vec![console.clone()]);

    // Two hours on, the soonest one is ongoing
    let ongoing = repo
        .list(
            TournamentFilter {
                status: Some(TournamentStatus::Ongoing),
                ..Default::default()
            },
            sooner.match_start_time + Duration::minutes(2),
        )
        .await;
    assert_eq!(ongoing.len(), 1);
    assert_eq!(ongoing[0].id, sooner.id);

    let picked = repo.get_by_ids(&[later.id, Uuid::new_v4()]).await;
    assert_eq!(picked.len(), 1);
}

#[tokio::test]
async fn test_capacity_is_enforced() {
    let repo = TournamentRepo::new();
    let row = repo
        .create(Uuid::new_v4(), normalized(Duration::hours(2), 2, "pc"), now())
        .await;

    assert_eq!(repo.add_player(row.id).await.unwrap().current_players, 1);
    assert_eq!(repo.add_player(row.id).await.unwrap().current_players, 2);
    assert_eq!(repo.add_player(row.id).await, Err(RepoError::TournamentFull));

    assert_eq!(repo.remove_player(row.id).await.unwrap().current_players, 1);
    assert_eq!(repo.remove_player(row.id).await.unwrap().current_players, 0);
    assert_eq!(repo.remove_player(row.id).await, Err(RepoError::NoActivePlayers));

    let missing = Uuid::new_v4();
    assert_eq!(
        repo.add_player(missing).await,
        Err(RepoError::TournamentNotFound(missing))
    );
}

#[tokio::test]
async fn test_join_is_at_most_once() {
    let repo = ParticipantRepo::new();
    let tournament = Uuid::new_v4();
    let user = Uuid::new_v4();

    repo.join(tournament, user, now()).await.unwrap();
    assert_eq!(
        repo.join(tournament, user, now()).await,
        Err(RepoError::AlreadyJoined)
    );
    assert!(repo.is_participant(tournament, user).await);
    assert_eq!(repo.get_by_tournament(tournament).await.len(), 1);
    assert_eq!(repo.get_user_tournament_ids(user).await, vec![tournament]);

    repo.leave(tournament, user).await.unwrap();
    assert_eq!(
        repo.leave(tournament, user).await,
        Err(RepoError::NotParticipant)
    );
}

#[tokio::test]
async fn test_concurrent_joins_record_one_membership() {
    let repo = ParticipantRepo::new();
    let tournament = Uuid::new_v4();
    let user = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.join(tournament, user, now()).await
        }));
    }

    let mut joined = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            joined += 1;
        }
    }
    assert_eq!(joined, 1);
    assert_eq!(repo.get_by_tournament(tournament).await.len(), 1);
}

#[tokio::test]
async fn test_wallet_debit_and_credit() {
    let wallets = WalletRepo::new();
    let user = Uuid::new_v4();
    let tournament = Uuid::new_v4();

    assert_eq!(wallets.balance(user).await, 0);
    wallets.top_up(user, 150, now()).await.unwrap();

    let debit = wallets
        .debit(user, 100, TransactionKind::EntryFee, Some(tournament), now())
        .await
        .unwrap();
    assert_eq!(debit.amount, -100);
    assert_eq!(debit.balance_after, 50);

    assert_eq!(
        wallets
            .debit(user, 100, TransactionKind::EntryFee, Some(tournament), now())
            .await,
        Err(RepoError::InsufficientBalance {
            required: 100,
            available: 50,
        })
    );

    wallets
        .credit(user, 50, TransactionKind::Refund, Some(tournament), now())
        .await
        .unwrap();
    assert_eq!(wallets.balance(user).await, 100);

    let kinds: Vec<TransactionKind> = wallets
        .transactions(user)
        .await
        .into_iter()
        .map(|row| row.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::TopUp,
            TransactionKind::EntryFee,
            TransactionKind::Refund
        ]
    );

    assert_eq!(
        wallets.top_up(user, 0, now()).await,
        Err(RepoError::InvalidAmount(0))
    );
    assert_eq!("refund".parse::<TransactionKind>(), Ok(TransactionKind::Refund));
}
