//! Time-gated tournament state.
//!
//! All functions here are stateless: the same `(now, timestamps)` pair always
//! produces the same answer, so callers may re-evaluate as often as they poll.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Party codes become distributable this long before the match starts.
pub const PARTY_JOIN_LEAD_MINUTES: i64 = 10;
/// A match counts as ongoing for this long after its start time.
pub const ONGOING_WINDOW_MINUTES: i64 = 10;
/// Hosts may enter the party code during this window right before party-join time.
pub const PARTY_CODE_ENTRY_WINDOW_MINUTES: i64 = 1;
pub const STARTING_PHASE_MINUTES: i64 = 5;
pub const PREPARING_PHASE_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentTimestamps {
    pub match_start_time: DateTime<Utc>,
    pub party_join_time: DateTime<Utc>,
    pub match_result_time: Option<DateTime<Utc>>,
}

impl TournamentTimestamps {
    /// The only way to build timestamps: party-join time is always derived.
    pub fn from_match_start(
        match_start_time: DateTime<Utc>,
        match_result_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            match_start_time,
            party_join_time: party_join_time_for(match_start_time),
            match_result_time,
        }
    }
}

pub fn party_join_time_for(match_start_time: DateTime<Utc>) -> DateTime<Utc> {
    match_start_time - Duration::minutes(PARTY_JOIN_LEAD_MINUTES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Done,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Done => "done",
        }
    }

    /// Display label shown on tournament cards
    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "Upcoming",
            TournamentStatus::Ongoing => "Ongoing",
            TournamentStatus::Done => "Completed",
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(TournamentStatus::Upcoming),
            "ongoing" => Ok(TournamentStatus::Ongoing),
            "done" | "completed" => Ok(TournamentStatus::Done),
            _ => Err(format!("Unknown tournament status: {}", s)),
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    Live,
    Starting,
    Preparing,
    Waiting,
}

impl CountdownPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownPhase::Live => "live",
            CountdownPhase::Starting => "starting",
            CountdownPhase::Preparing => "preparing",
            CountdownPhase::Waiting => "waiting",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CountdownPhase::Live => "Tournament is LIVE!",
            CountdownPhase::Starting => "Starting Soon!",
            CountdownPhase::Preparing => "Get Ready!",
            CountdownPhase::Waiting => "Tournament Starting",
        }
    }
}

/// Where "now" sits relative to party-join time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyCodeWindow {
    /// More than the entry window before party-join time.
    Closed,
    /// Inside the one-minute pre-window; host entry allowed, code still hidden.
    EntryOpen,
    /// Party-join time reached; participants may see the code.
    Available,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_remaining(remaining: Duration) -> Self {
        let total = remaining.num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Informational status: upcoming before T, ongoing for ten minutes from T
/// (inclusive), done afterwards.
pub fn derive_status(match_start_time: DateTime<Utc>, now: DateTime<Utc>) -> TournamentStatus {
    if now < match_start_time {
        TournamentStatus::Upcoming
    } else if now <= match_start_time + Duration::minutes(ONGOING_WINDOW_MINUTES) {
        TournamentStatus::Ongoing
    } else {
        TournamentStatus::Done
    }
}

pub fn derive_countdown_phase(match_start_time: DateTime<Utc>, now: DateTime<Utc>) -> CountdownPhase {
    let remaining = match_start_time - now;

    if remaining <= Duration::zero() {
        CountdownPhase::Live
    } else if remaining <= Duration::minutes(STARTING_PHASE_MINUTES) {
        CountdownPhase::Starting
    } else if remaining <= Duration::minutes(PREPARING_PHASE_MINUTES) {
        CountdownPhase::Preparing
    } else {
        CountdownPhase::Waiting
    }
}

pub fn party_code_window(party_join_time: DateTime<Utc>, now: DateTime<Utc>) -> PartyCodeWindow {
    let until_join = party_join_time - now;

    if until_join <= Duration::zero() {
        PartyCodeWindow::Available
    } else if until_join <= Duration::minutes(PARTY_CODE_ENTRY_WINDOW_MINUTES) {
        PartyCodeWindow::EntryOpen
    } else {
        PartyCodeWindow::Closed
    }
}

/// Host edit gate: open during the one-minute pre-window and from
/// party-join time onwards.
pub fn can_set_party_code(party_join_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    matches!(
        party_code_window(party_join_time, now),
        PartyCodeWindow::EntryOpen | PartyCodeWindow::Available
    )
}

/// Participant view gate. The code value must never reach a participant
/// before this returns true.
pub fn can_view_party_code(party_join_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= party_join_time
}

fn format_mm_ss(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Status line for the host's party-code panel.
pub fn host_party_code_message(party_join_time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let until_join = party_join_time - now;
    match party_code_window(party_join_time, now) {
        PartyCodeWindow::EntryOpen => format!(
            "Party code entry available! {} remaining",
            format_mm_ss(until_join)
        ),
        PartyCodeWindow::Available => "Party join time has passed".to_string(),
        PartyCodeWindow::Closed => format!(
            "Party code entry will be available in {}",
            format_mm_ss(until_join - Duration::minutes(PARTY_CODE_ENTRY_WINDOW_MINUTES))
        ),
    }
}

/// Status line for the participant's party-code panel.
pub fn participant_party_code_message(party_join_time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if can_view_party_code(party_join_time, now) {
        "Party code is now available!".to_string()
    } else {
        format!(
            "Party code will be available in {}",
            format_mm_ss(party_join_time - now)
        )
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s from now")
    } else {
        format!("{count} {unit} from now")
    }
}

/// Coarse relative description used on tournament lists.
pub fn describe_time_until(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = target - now;
    if diff < Duration::zero() {
        return "Tournament ended".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours();
    let minutes = diff.num_minutes();

    if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        "Starting now".to_string()
    }
}

/// The discrete part of a snapshot; changes here are what pollers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifecycleState {
    pub status: TournamentStatus,
    pub phase: CountdownPhase,
    pub party_code_window: PartyCodeWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSnapshot {
    pub status: TournamentStatus,
    pub phase: CountdownPhase,
    pub countdown: Countdown,
    pub party_code_window: PartyCodeWindow,
    pub can_set_party_code: bool,
    pub can_view_party_code: bool,
    pub seconds_until_start: i64,
    pub seconds_until_party_join: i64,
}

impl LifecycleSnapshot {
    pub fn state(&self) -> LifecycleState {
        LifecycleState {
            status: self.status,
            phase: self.phase,
            party_code_window: self.party_code_window,
        }
    }
}

pub fn evaluate(now: DateTime<Utc>, timestamps: &TournamentTimestamps) -> LifecycleSnapshot {
    let start = timestamps.match_start_time;
    let party_join = timestamps.party_join_time;

    LifecycleSnapshot {
        status: derive_status(start, now),
        phase: derive_countdown_phase(start, now),
        countdown: Countdown::from_remaining(start - now),
        party_code_window: party_code_window(party_join, now),
        can_set_party_code: can_set_party_code(party_join, now),
        can_view_party_code: can_view_party_code(party_join, now),
        seconds_until_start: (start - now).num_seconds(),
        seconds_until_party_join: (party_join - now).num_seconds(),
    }
}
