use domain::prize::{distributable_pool, raw_pool};
use domain::{
    compute_breakdown, compute_prize_split, PreconditionError, PrizeShares, PrizeSplit, Share,
    ShareError,
};

fn shares(first: f64, second: f64, third: f64) -> PrizeShares {
    PrizeShares::new(
        Share::from_fraction(first).unwrap(),
        Share::from_fraction(second).unwrap(),
        Share::from_fraction(third).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_prize_math_scenario() {
    let shares = shares(0.5, 0.3, 0.2);

    assert_eq!(raw_pool(100, 16).unwrap(), 1600);
    assert_eq!(distributable_pool(100, 16).unwrap(), 1120);
    assert_eq!(
        compute_prize_split(100, 16, &shares).unwrap(),
        PrizeSplit {
            first: 560,
            second: 336,
            third: 224,
        }
    );
}

#[test]
fn test_zero_players_pays_nothing() {
    let split = compute_prize_split(250, 0, &PrizeShares::default()).unwrap();
    assert_eq!(split, PrizeSplit::default());
}

#[test]
fn test_amounts_are_floored_and_never_exceed_distributable_pool() {
    let odd_shares = [
        shares(0.5, 0.3, 0.2),
        shares(0.3333, 0.3333, 0.3334),
        shares(0.61, 0.27, 0.12),
        shares(1.0, 0.0, 0.0),
        shares(0.0, 0.0, 0.0),
        shares(0.45, 0.35, 0.15),
    ];

    for fee in [0_i64, 1, 3, 7, 33, 99, 101, 250, 1_337] {
        for players in [0_i64, 1, 2, 3, 5, 9, 17, 64, 128] {
            let bound = distributable_pool(fee, players).unwrap();
            // floor(fee * players * 0.70) computed independently
            assert_eq!(bound, fee * players * 7 / 10);

            for shares in &odd_shares {
                let split = compute_prize_split(fee, players, shares).unwrap();
                assert!(split.first >= 0 && split.second >= 0 && split.third >= 0);
                assert!(
                    split.total() <= bound,
                    "fee {fee}, players {players}, shares {shares:?}: {split:?} > {bound}"
                );
            }
        }
    }
}

#[test]
fn test_split_is_deterministic() {
    let shares = shares(0.61, 0.27, 0.12);
    let first = compute_prize_split(77, 13, &shares).unwrap();
    let second = compute_prize_split(77, 13, &shares).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fractional_distributable_pool_is_floored() {
    // 101 * 1 * 0.70 = 70.7
    assert_eq!(distributable_pool(101, 1).unwrap(), 70);
    let split = compute_prize_split(101, 1, &PrizeShares::default()).unwrap();
    // 70.7 * 0.5 = 35.35, 70.7 * 0.3 = 21.21, 70.7 * 0.2 = 14.14
    assert_eq!(
        split,
        PrizeSplit {
            first: 35,
            second: 21,
            third: 14,
        }
    );
}

#[test]
fn test_negative_inputs_are_precondition_errors() {
    assert_eq!(
        compute_prize_split(-5, 3, &PrizeShares::default()),
        Err(PreconditionError::NegativeJoiningFee(-5))
    );
    assert_eq!(
        compute_prize_split(5, -3, &PrizeShares::default()),
        Err(PreconditionError::NegativePlayerCount(-3))
    );
}

#[test]
fn test_pool_overflow_is_reported() {
    assert!(matches!(
        raw_pool(i64::MAX, 2),
        Err(PreconditionError::PoolOverflow { .. })
    ));
}

#[test]
fn test_breakdown_reports_fees_and_remainder() {
    let breakdown = compute_breakdown(
        101,
        3,
        Share::from_percent(5.0).unwrap(),
        &PrizeShares::default(),
    )
    .unwrap();

    assert_eq!(breakdown.raw_pool, 303);
    assert_eq!(breakdown.platform_fee, 45); // floor(45.45)
    assert_eq!(breakdown.host_cut, 15); // floor(15.15)
    assert_eq!(breakdown.distributable_pool, 212); // floor(212.1)
    assert_eq!(
        breakdown.split,
        PrizeSplit {
            first: 106,
            second: 63,
            third: 42,
        }
    );
    assert_eq!(breakdown.undistributed, 1);
}

#[test]
fn test_missing_stored_percentages_use_default_split() {
    let defaults = PrizeShares::default();
    assert_eq!(defaults.first.fraction(), 0.5);
    assert_eq!(defaults.second.fraction(), 0.3);
    assert_eq!(defaults.third.fraction(), 0.2);

    assert_eq!(PrizeShares::from_stored(None, None, None).unwrap(), defaults);
    assert_eq!(
        PrizeShares::from_stored(Some(0.6), None, Some(0.1)).unwrap(),
        defaults
    );
}

#[test]
fn test_stored_percentages_are_normalized_to_fractions() {
    let from_fractions = PrizeShares::from_stored(Some(0.6), Some(0.25), Some(0.15)).unwrap();
    let from_percents = PrizeShares::from_stored(Some(60.0), Some(25.0), Some(15.0)).unwrap();

    assert_eq!(from_fractions.first.basis_points(), 6_000);
    assert_eq!(from_percents.first.basis_points(), 6_000);
    assert_eq!(from_fractions.total_basis_points(), from_percents.total_basis_points());
}

#[test]
fn test_invalid_stored_percentages_are_rejected() {
    assert_eq!(Share::from_stored(-0.1), Err(ShareError::OutOfRange(-0.1)));
    assert_eq!(Share::from_stored(150.0), Err(ShareError::OutOfRange(150.0)));
    assert_eq!(Share::from_stored(f64::INFINITY), Err(ShareError::NotFinite));
    assert!(matches!(
        PrizeShares::from_stored(Some(0.6), Some(0.3), Some(0.2)),
        Err(ShareError::ExceedsWhole(_))
    ));
}

#[test]
fn test_stored_shares_over_whole_by_less_than_a_basis_point_are_rejected() {
    assert!(matches!(
        PrizeShares::from_stored(Some(0.50004), Some(0.50004), Some(0.0)),
        Err(ShareError::ExceedsWhole(_))
    ));
    assert!(PrizeShares::from_stored(Some(0.333), Some(0.333), Some(0.334)).is_ok());
}

#[test]
fn test_stored_host_share_is_capped() {
    assert_eq!(Share::host_from_stored(0.15).unwrap().basis_points(), 1_500);
    assert_eq!(Share::host_from_stored(15.0).unwrap().basis_points(), 1_500);
    assert_eq!(Share::host_from_stored(0.0).unwrap(), Share::ZERO);
    assert!(matches!(
        Share::host_from_stored(0.5),
        Err(ShareError::HostCutTooLarge(_))
    ));
    assert!(matches!(
        Share::host_from_stored(20.0),
        Err(ShareError::HostCutTooLarge(_))
    ));
}

#[test]
fn test_share_serializes_as_fraction() {
    let json = serde_json::to_string(&Share::from_percent(25.0).unwrap()).unwrap();
    assert_eq!(json, "0.25");

    let parsed: Result<Share, _> = serde_json::from_str("1.5");
    assert!(parsed.is_err());
}
