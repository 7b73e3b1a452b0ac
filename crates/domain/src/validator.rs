//! Creation-time validation of tournament drafts.
//!
//! Every invalid field is reported, not just the first one, so a form can
//! show all problems at once. Validation is pure; re-run it with a fresh
//! `now` at submission time because the start-time rule depends on it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clock::parse_timestamp;
use crate::lifecycle::TournamentTimestamps;
use crate::prize::{PrizeShares, Share, MAX_HOST_PERCENT};

/// Minimum lead time between validation and the match start. Independent
/// from the leave-penalty threshold even though both are 15 today.
pub const MIN_CREATION_LEAD_MINUTES: i64 = 15;
pub const MAX_NAME_CHARS: usize = 100;
pub const MIN_CAPACITY: i64 = 2;
pub const MAX_CAPACITY: i64 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Pc,
    Console,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Console => "console",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" => Ok(Platform::Pc),
            "console" => Ok(Platform::Console),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Eu,
    Na,
    Latam,
    Br,
    Ap,
    Kr,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "eu",
            Region::Na => "na",
            Region::Latam => "latam",
            Region::Br => "br",
            Region::Ap => "ap",
            Region::Kr => "kr",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eu" => Ok(Region::Eu),
            "na" => Ok(Region::Na),
            "latam" => Ok(Region::Latam),
            "br" => Ok(Region::Br),
            "ap" => Ok(Region::Ap),
            "kr" => Ok(Region::Kr),
            other => Err(format!("Unknown region: {}", other)),
        }
    }
}

/// Raw creation payload as submitted by a host. Percentages are whole
/// numbers (0-100) here; they become fractions once validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentDraft {
    pub name: String,
    pub match_start_time: Option<String>,
    pub match_result_time: Option<String>,
    pub joining_fee: Option<i64>,
    pub capacity: Option<i64>,
    pub host_percentage: Option<f64>,
    pub prize_first_pct: Option<f64>,
    pub prize_second_pct: Option<f64>,
    pub prize_third_pct: Option<f64>,
    pub platform: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    MatchStartTime,
    MatchResultTime,
    JoiningFee,
    Capacity,
    HostPercentage,
    PrizeFirstPct,
    PrizeSecondPct,
    PrizeThirdPct,
    Platform,
    Region,
    /// Cross-field rule: the three prize percentages together.
    PrizePercentages,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::MatchStartTime => "match_start_time",
            DraftField::MatchResultTime => "match_result_time",
            DraftField::JoiningFee => "joining_fee",
            DraftField::Capacity => "capacity",
            DraftField::HostPercentage => "host_percentage",
            DraftField::PrizeFirstPct => "prize_first_pct",
            DraftField::PrizeSecondPct => "prize_second_pct",
            DraftField::PrizeThirdPct => "prize_third_pct",
            DraftField::Platform => "platform",
            DraftField::Region => "region",
            DraftField::PrizePercentages => "prize_percentages",
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, DraftField::PrizePercentages)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

/// All problems found in a draft, one entry per invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: DraftField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> Vec<DraftField> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .errors
            .iter()
            .map(|e| e.field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "tournament draft has {} invalid field(s): {}",
            self.errors.len(),
            fields
        )
    }
}

impl std::error::Error for FieldErrors {}

/// A validated draft ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTournament {
    pub name: String,
    pub match_start_time: DateTime<Utc>,
    pub party_join_time: DateTime<Utc>,
    pub match_result_time: Option<DateTime<Utc>>,
    pub joining_fee: i64,
    pub capacity: i64,
    pub host_share: Share,
    pub prize_shares: PrizeShares,
    pub platform: Platform,
    pub region: Region,
}

impl NormalizedTournament {
    pub fn timestamps(&self) -> TournamentTimestamps {
        TournamentTimestamps::from_match_start(self.match_start_time, self.match_result_time)
    }
}

pub const START_TIME_TOO_SOON: &str = "Match start time must be at least 15 minutes from now";

/// The lead-time rule on its own, for edit sessions that must keep
/// re-checking a start time that was valid when it was entered.
pub fn check_match_start(start: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), String> {
    if start < now + Duration::minutes(MIN_CREATION_LEAD_MINUTES) {
        return Err(START_TIME_TOO_SOON.to_string());
    }
    Ok(())
}

impl TournamentDraft {
    /// True when the draft holds a parseable start time that has fallen
    /// under the minimum lead time.
    pub fn start_time_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.match_start_time
            .as_deref()
            .and_then(|raw| parse_timestamp(raw).ok())
            .is_some_and(|start| check_match_start(start, now).is_err())
    }
}

fn validate_prize_pct(
    errors: &mut FieldErrors,
    field: DraftField,
    place: &str,
    value: Option<f64>,
) -> Option<Share> {
    match value.map(|pct| (pct, Share::from_percent(pct))) {
        Some((pct, Ok(share))) if has_basis_point_precision(pct) => Some(share),
        Some((_, Ok(_))) => {
            errors.push(
                field,
                format!("{place} prize percentage can have at most two decimal places"),
            );
            None
        }
        _ => {
            errors.push(field, format!("{place} prize percentage must be between 0 and 100"));
            None
        }
    }
}

// Absorbs binary float error only, e.g. 33.3 + 33.3 + 33.4.
const PERCENT_TOLERANCE: f64 = 1e-6;

// Exact sum over whatever finite values were supplied. No per-value
// rounding, so 50.004 + 50.004 is over 100.
fn prize_total_percent(draft: &TournamentDraft) -> f64 {
    [
        draft.prize_first_pct,
        draft.prize_second_pct,
        draft.prize_third_pct,
    ]
    .into_iter()
    .flatten()
    .filter(|pct| pct.is_finite())
    .sum()
}

// Shares are stored in basis points, so anything finer than 0.01% would be
// rounded on the way in.
fn has_basis_point_precision(percent: f64) -> bool {
    let scaled = percent * 100.0;
    (scaled - scaled.round()).abs() <= PERCENT_TOLERANCE
}

pub fn validate_tournament_draft(
    draft: &TournamentDraft,
    now: DateTime<Utc>,
) -> Result<NormalizedTournament, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.push(DraftField::Name, "Tournament name is required");
    } else if name.chars().count() > MAX_NAME_CHARS {
        errors.push(
            DraftField::Name,
            format!("Tournament name must be at most {MAX_NAME_CHARS} characters"),
        );
    }

    let match_start_time = match draft.match_start_time.as_deref().map(parse_timestamp) {
        None => {
            errors.push(DraftField::MatchStartTime, "Match start time is required");
            None
        }
        Some(Err(e)) => {
            errors.push(DraftField::MatchStartTime, format!("Match start time is invalid: {e}"));
            None
        }
        Some(Ok(start)) => match check_match_start(start, now) {
            Ok(()) => Some(start),
            Err(message) => {
                errors.push(DraftField::MatchStartTime, message);
                None
            }
        },
    };

    let match_result_time = match draft.match_result_time.as_deref().map(parse_timestamp) {
        None => None,
        Some(Err(e)) => {
            errors.push(DraftField::MatchResultTime, format!("Match result time is invalid: {e}"));
            None
        }
        Some(Ok(result)) => {
            if match_start_time.is_some_and(|start| result < start) {
                errors.push(
                    DraftField::MatchResultTime,
                    "Match result time cannot be before the match start time",
                );
            }
            Some(result)
        }
    };

    let joining_fee = match draft.joining_fee {
        Some(fee) if fee >= 0 => Some(fee),
        _ => {
            errors.push(DraftField::JoiningFee, "Valid joining fee is required");
            None
        }
    };

    let capacity = match draft.capacity {
        Some(capacity) if capacity < MIN_CAPACITY => {
            errors.push(DraftField::Capacity, "Capacity must be at least 2 participants");
            None
        }
        Some(capacity) if capacity > MAX_CAPACITY => {
            errors.push(
                DraftField::Capacity,
                format!("Capacity cannot exceed {MAX_CAPACITY} participants"),
            );
            None
        }
        Some(capacity) => Some(capacity),
        None => {
            errors.push(DraftField::Capacity, "Capacity must be at least 2 participants");
            None
        }
    };

    let host_share = match draft.host_percentage {
        Some(pct) if pct.is_finite() && (0.0..=MAX_HOST_PERCENT).contains(&pct) => {
            Share::from_percent(pct).ok()
        }
        _ => None,
    };
    if host_share.is_none() {
        errors.push(DraftField::HostPercentage, "Host percentage must be between 0 and 15");
    }

    let first = validate_prize_pct(&mut errors, DraftField::PrizeFirstPct, "First", draft.prize_first_pct);
    let second = validate_prize_pct(&mut errors, DraftField::PrizeSecondPct, "Second", draft.prize_second_pct);
    let third = validate_prize_pct(&mut errors, DraftField::PrizeThirdPct, "Third", draft.prize_third_pct);

    if prize_total_percent(draft) > 100.0 + PERCENT_TOLERANCE {
        errors.push(
            DraftField::PrizePercentages,
            "Total prize percentages cannot exceed 100%",
        );
    }

    let platform = match draft.platform.as_deref().map(Platform::from_str) {
        Some(Ok(platform)) => Some(platform),
        _ => {
            errors.push(DraftField::Platform, "Platform must be one of: pc, console");
            None
        }
    };

    let region = match draft.region.as_deref().map(Region::from_str) {
        Some(Ok(region)) => Some(region),
        _ => {
            errors.push(
                DraftField::Region,
                "Region must be one of: eu, na, latam, br, ap, kr",
            );
            None
        }
    };

    if !errors.is_empty() {
        tracing::debug!("Rejected tournament draft: {}", errors);
        return Err(errors);
    }

    match (
        match_start_time,
        joining_fee,
        capacity,
        host_share,
        first,
        second,
        third,
        platform,
        region,
    ) {
        (
            Some(start),
            Some(joining_fee),
            Some(capacity),
            Some(host_share),
            Some(first),
            Some(second),
            Some(third),
            Some(platform),
            Some(region),
        ) => {
            let prize_shares = PrizeShares::new(first, second, third).map_err(|e| {
                let mut errors = FieldErrors::default();
                errors.push(DraftField::PrizePercentages, e.to_string());
                errors
            })?;
            let timestamps = TournamentTimestamps::from_match_start(start, match_result_time);

            Ok(NormalizedTournament {
                name: name.to_string(),
                match_start_time: timestamps.match_start_time,
                party_join_time: timestamps.party_join_time,
                match_result_time: timestamps.match_result_time,
                joining_fee,
                capacity,
                host_share,
                prize_shares,
                platform,
                region,
            })
        }
        // every None above recorded an error
        _ => Err(errors),
    }
}
