//! Prize-pool accounting.
//!
//! Participants are entitled to 70% of the joining-fee pool. A fixed 15%
//! platform fee and the host cut (0-15%) are taken first. Place shares are
//! fractions of that 70% portion, never of the raw pool.
//!
//! Shares are stored as fractions of one and quantized to basis points so
//! every money computation is exact integer math. Amounts are floored; the
//! rounding remainder is not distributed.

use serde::{Deserialize, Serialize};

use crate::error::{PreconditionError, ShareError};

pub const PLATFORM_FEE_PERCENT: i64 = 15;
pub const DISTRIBUTABLE_PERCENT: i64 = 70;
pub const MAX_HOST_PERCENT: f64 = 15.0;

const BASIS_POINTS_PER_WHOLE: i64 = 10_000;
const FRACTION_TOLERANCE: f64 = 1e-8;

/// A fraction of one in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Share(f64);

impl Share {
    pub const ZERO: Share = Share(0.0);

    pub fn from_fraction(fraction: f64) -> Result<Self, ShareError> {
        if !fraction.is_finite() {
            return Err(ShareError::NotFinite);
        }
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ShareError::OutOfRange(fraction));
        }
        Ok(Share(fraction))
    }

    /// Whole-number percent input (0-100), as typed by a host.
    pub fn from_percent(percent: f64) -> Result<Self, ShareError> {
        if !percent.is_finite() {
            return Err(ShareError::NotFinite);
        }
        if !(0.0..=100.0).contains(&percent) {
            return Err(ShareError::OutOfRange(percent));
        }
        Ok(Share(percent / 100.0))
    }

    /// Read a persisted value whose scale is not trusted: `[0, 1]` is a
    /// fraction, `(1, 100]` is a whole percent.
    pub fn from_stored(value: f64) -> Result<Self, ShareError> {
        if !value.is_finite() {
            return Err(ShareError::NotFinite);
        }
        if value > 1.0 {
            Share::from_percent(value)
        } else {
            Share::from_fraction(value)
        }
    }

    /// Read a persisted host cut, which may never exceed
    /// [`MAX_HOST_PERCENT`].
    pub fn host_from_stored(value: f64) -> Result<Self, ShareError> {
        let share = Share::from_stored(value)?;
        if share.basis_points() > (MAX_HOST_PERCENT * 100.0) as i64 {
            return Err(ShareError::HostCutTooLarge(share.percent()));
        }
        Ok(share)
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    pub fn basis_points(&self) -> i64 {
        (self.0 * BASIS_POINTS_PER_WHOLE as f64).round() as i64
    }
}

impl TryFrom<f64> for Share {
    type Error = ShareError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Share::from_fraction(value)
    }
}

impl From<Share> for f64 {
    fn from(share: Share) -> Self {
        share.0
    }
}

/// First/second/third place shares of the distributable pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrizeShares {
    pub first: Share,
    pub second: Share,
    pub third: Share,
}

impl Default for PrizeShares {
    /// 50/30/20, used for tournaments that predate custom splits.
    fn default() -> Self {
        Self {
            first: Share(0.5),
            second: Share(0.3),
            third: Share(0.2),
        }
    }
}

impl PrizeShares {
    pub fn new(first: Share, second: Share, third: Share) -> Result<Self, ShareError> {
        let shares = Self {
            first,
            second,
            third,
        };
        let exact = first.0 + second.0 + third.0;
        if exact > 1.0 + FRACTION_TOLERANCE
            || shares.total_basis_points() > BASIS_POINTS_PER_WHOLE
        {
            return Err(ShareError::ExceedsWhole(exact * 100.0));
        }
        Ok(shares)
    }

    /// Normalize persisted percentages. Any missing field means the record
    /// predates customization and gets the default split.
    pub fn from_stored(
        first: Option<f64>,
        second: Option<f64>,
        third: Option<f64>,
    ) -> Result<Self, ShareError> {
        match (first, second, third) {
            (Some(first), Some(second), Some(third)) => PrizeShares::new(
                Share::from_stored(first)?,
                Share::from_stored(second)?,
                Share::from_stored(third)?,
            ),
            _ => Ok(PrizeShares::default()),
        }
    }

    pub fn total_basis_points(&self) -> i64 {
        self.first.basis_points() + self.second.basis_points() + self.third.basis_points()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeSplit {
    pub first: i64,
    pub second: i64,
    pub third: i64,
}

impl PrizeSplit {
    pub fn total(&self) -> i64 {
        self.first + self.second + self.third
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeBreakdown {
    pub raw_pool: i64,
    pub platform_fee: i64,
    pub host_cut: i64,
    pub distributable_pool: i64,
    pub split: PrizeSplit,
    /// Floored-away credits that no place receives.
    pub undistributed: i64,
}

fn checked_raw_pool(joining_fee: i64, current_players: i64) -> Result<i64, PreconditionError> {
    if joining_fee < 0 {
        return Err(PreconditionError::NegativeJoiningFee(joining_fee));
    }
    if current_players < 0 {
        return Err(PreconditionError::NegativePlayerCount(current_players));
    }
    joining_fee
        .checked_mul(current_players)
        .ok_or(PreconditionError::PoolOverflow {
            fee: joining_fee,
            players: current_players,
        })
}

// floor(pool * percent/100 * bps/10_000) without intermediate rounding
fn portion(raw_pool: i64, percent: i64, basis_points: i64) -> i64 {
    let numerator = raw_pool as i128 * percent as i128 * basis_points as i128;
    (numerator / (100 * BASIS_POINTS_PER_WHOLE as i128)) as i64
}

pub fn raw_pool(joining_fee: i64, current_players: i64) -> Result<i64, PreconditionError> {
    checked_raw_pool(joining_fee, current_players)
}

/// `floor(rawPool * 0.70)`, the upper bound for what places can receive.
pub fn distributable_pool(joining_fee: i64, current_players: i64) -> Result<i64, PreconditionError> {
    let raw = checked_raw_pool(joining_fee, current_players)?;
    Ok(portion(raw, DISTRIBUTABLE_PERCENT, BASIS_POINTS_PER_WHOLE))
}

pub fn compute_prize_split(
    joining_fee: i64,
    current_players: i64,
    shares: &PrizeShares,
) -> Result<PrizeSplit, PreconditionError> {
    let raw = checked_raw_pool(joining_fee, current_players)?;

    Ok(PrizeSplit {
        first: portion(raw, DISTRIBUTABLE_PERCENT, shares.first.basis_points()),
        second: portion(raw, DISTRIBUTABLE_PERCENT, shares.second.basis_points()),
        third: portion(raw, DISTRIBUTABLE_PERCENT, shares.third.basis_points()),
    })
}

pub fn compute_breakdown(
    joining_fee: i64,
    current_players: i64,
    host_share: Share,
    shares: &PrizeShares,
) -> Result<PrizeBreakdown, PreconditionError> {
    let raw = checked_raw_pool(joining_fee, current_players)?;
    let distributable = portion(raw, DISTRIBUTABLE_PERCENT, BASIS_POINTS_PER_WHOLE);
    let split = compute_prize_split(joining_fee, current_players, shares)?;

    Ok(PrizeBreakdown {
        raw_pool: raw,
        platform_fee: portion(raw, PLATFORM_FEE_PERCENT, BASIS_POINTS_PER_WHOLE),
        host_cut: portion(raw, 100, host_share.basis_points()),
        distributable_pool: distributable,
        split,
        undistributed: distributable - split.total(),
    })
}
