//! Core domain types for dialdeck
//!
//! These types form the boundary between the hosted store and the analytics
//! engine. Rows arrive as JSON from the caller's fetch layer; nullable store
//! columns deserialize to `Option` here and are coerced to defaults (0, false)
//! by the accessor methods, so the engine never branches on "is this field
//! present".
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Dial** | One outbound call attempt, one [`ActivityEvent`] row |
//! | **Answered** | An event whose outcome matches `connected` case-insensitively |
//! | **DM conversation** | An answered event additionally flagged as reaching a decision-maker |
//! | **SQL** | A sales-qualified lead, represented as a [`MeetingRecord`] |
//! | **Snapshot** | A pre-aggregated per-(performer, client, date) rollup row |
//! | **Working day** | A Monday–Friday calendar date, irrespective of holidays |

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================
// Activity events
// ============================================

/// One logged call/contact attempt.
///
/// Append-only from the store's perspective; the engine never mutates events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Opaque store identifier
    pub id: String,
    /// When the call was placed
    pub occurred_at: DateTime<Utc>,
    /// Display name of the SDR who placed the call
    pub performer: String,
    /// Client this call was made for (if attributed)
    #[serde(default)]
    pub client: Option<String>,
    /// Contact name reached (if any)
    #[serde(default)]
    pub contact: Option<String>,
    /// Company of the contact
    #[serde(default)]
    pub company: Option<String>,
    /// Free-text call outcome; `"connected"` is load-bearing (case-insensitive)
    #[serde(default)]
    pub outcome: Option<String>,
    /// Call duration in seconds
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Whether the call reached a decision-maker (absent ≈ false)
    #[serde(default)]
    pub is_decision_maker: Option<bool>,
}

impl ActivityEvent {
    /// An event counts toward "answered" iff its outcome case-insensitively
    /// equals `connected`.
    pub fn is_answered(&self) -> bool {
        self.outcome
            .as_deref()
            .map(|o| o.trim().eq_ignore_ascii_case("connected"))
            .unwrap_or(false)
    }

    /// An answered event additionally flagged as reaching a decision-maker.
    pub fn is_dm_conversation(&self) -> bool {
        self.is_answered() && self.is_decision_maker.unwrap_or(false)
    }

    /// Calendar date this event occurred on (UTC, day granularity).
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Hour of day (0-23) this event occurred at.
    pub fn hour_of_day(&self) -> u32 {
        self.occurred_at.hour()
    }
}

// ============================================
// Daily snapshots
// ============================================

/// A pre-aggregated per-(performer, client, date) rollup.
///
/// Used where per-event granularity is unnecessary (overview KPIs,
/// leaderboard). Summing snapshots for a scope must equal summing raw events
/// for the same scope when both are available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Day this rollup covers
    pub date: NaiveDate,
    /// Display name of the SDR
    pub performer: String,
    /// Client this rollup is attributed to
    #[serde(default)]
    pub client: Option<String>,
    /// Dials placed (absent ≈ 0)
    #[serde(default)]
    pub dials: Option<i64>,
    /// Calls answered (absent ≈ 0)
    #[serde(default)]
    pub answered: Option<i64>,
    /// Decision-maker conversations (absent ≈ 0)
    #[serde(default)]
    pub dms_reached: Option<i64>,
    /// Marketing-qualified leads (absent ≈ 0)
    #[serde(default)]
    pub mqls: Option<i64>,
    /// Sales-qualified leads (absent ≈ 0)
    #[serde(default)]
    pub sqls: Option<i64>,
}

impl DailySnapshot {
    pub fn dials_or_zero(&self) -> i64 {
        self.dials.unwrap_or(0)
    }

    pub fn answered_or_zero(&self) -> i64 {
        self.answered.unwrap_or(0)
    }

    pub fn dms_reached_or_zero(&self) -> i64 {
        self.dms_reached.unwrap_or(0)
    }

    pub fn mqls_or_zero(&self) -> i64 {
        self.mqls.unwrap_or(0)
    }

    pub fn sqls_or_zero(&self) -> i64 {
        self.sqls.unwrap_or(0)
    }
}

// ============================================
// Meetings
// ============================================

/// Status of a booked meeting.
///
/// Transitions are free-form (no enforced state machine), except that moving
/// to [`MeetingStatus::Reschedule`] spawns a new pending record; see
/// [`crate::meetings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Pending,
    Held,
    NoShow,
    Reschedule,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Pending => "pending",
            MeetingStatus::Held => "held",
            MeetingStatus::NoShow => "no_show",
            MeetingStatus::Reschedule => "reschedule",
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MeetingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MeetingStatus::Pending),
            "held" => Ok(MeetingStatus::Held),
            "no_show" => Ok(MeetingStatus::NoShow),
            "reschedule" => Ok(MeetingStatus::Reschedule),
            _ => Err(format!("unknown meeting status: {}", s)),
        }
    }
}

/// One SQL booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Opaque store identifier
    pub id: String,
    /// Day the meeting was booked (the day it counts as an SQL)
    pub booking_date: NaiveDate,
    /// Day the meeting is scheduled to happen
    #[serde(default)]
    pub meeting_date: Option<NaiveDate>,
    /// Client this booking belongs to
    #[serde(default)]
    pub client: Option<String>,
    /// Contact the meeting is with
    #[serde(default)]
    pub contact: Option<String>,
    /// Company of the contact
    #[serde(default)]
    pub company: Option<String>,
    /// Display name of the SDR who booked it
    pub performer: String,
    /// Current status
    pub status: MeetingStatus,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

// ============================================
// Campaign windows
// ============================================

/// Target window for a client campaign.
///
/// If any of start, end, or target is absent, pacing is undefined and the
/// engine reports "no campaign" rather than guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignWindow {
    /// Client this campaign belongs to
    pub client_id: String,
    /// First day of the campaign
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the campaign (inclusive)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// SQLs the campaign is committed to deliver
    #[serde(default)]
    pub target_sqls: Option<i64>,
}

impl CampaignWindow {
    /// Whether all three pacing inputs are present.
    pub fn is_defined(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some() && self.target_sqls.is_some()
    }
}

// ============================================
// Period filters
// ============================================

/// Quick-filter tag selecting the previous-period comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodTag {
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "last_month")]
    LastMonth,
    #[serde(rename = "custom")]
    Custom,
}

impl PeriodTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodTag::Last7Days => "last7days",
            PeriodTag::Last30Days => "last30days",
            PeriodTag::ThisMonth => "this_month",
            PeriodTag::LastMonth => "last_month",
            PeriodTag::Custom => "custom",
        }
    }
}

impl std::fmt::Display for PeriodTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PeriodTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "last7days" => Ok(PeriodTag::Last7Days),
            "last30days" => Ok(PeriodTag::Last30Days),
            "this_month" => Ok(PeriodTag::ThisMonth),
            "last_month" => Ok(PeriodTag::LastMonth),
            "custom" => Ok(PeriodTag::Custom),
            _ => Err(format!("unknown period tag: {}", s)),
        }
    }
}

/// A tag plus the concrete date range it resolved to.
///
/// Owned by the presentation layer; the engine consumes the resolved bounds
/// and uses the tag only to pick the previous-period rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodFilter {
    pub tag: PeriodTag,
    /// First day of the period (inclusive)
    pub from: NaiveDate,
    /// Last day of the period (inclusive)
    pub to: NaiveDate,
}

// ============================================
// Historical slice filters
// ============================================

/// Granularity of a historical drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    Day,
    Week,
    Month,
}

impl DateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateMode::Day => "day",
            DateMode::Week => "week",
            DateMode::Month => "month",
        }
    }
}

impl std::str::FromStr for DateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "day" => Ok(DateMode::Day),
            "week" => Ok(DateMode::Week),
            "month" => Ok(DateMode::Month),
            _ => Err(format!("unknown date mode: {}", s)),
        }
    }
}

/// Non-empty subset of Monday–Friday.
///
/// Toggling the last remaining day off is a no-op, not an error; weekend
/// days are never members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WeekdaySet {
    // Index 0 = Monday .. 4 = Friday
    days: [bool; 5],
}

const WORKWEEK: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

fn workweek_slot(day: Weekday) -> Option<usize> {
    match day {
        Weekday::Mon => Some(0),
        Weekday::Tue => Some(1),
        Weekday::Wed => Some(2),
        Weekday::Thu => Some(3),
        Weekday::Fri => Some(4),
        Weekday::Sat | Weekday::Sun => None,
    }
}

impl WeekdaySet {
    /// All five working days.
    pub fn full() -> Self {
        Self { days: [true; 5] }
    }

    /// Build a set from the given days; weekend days are rejected, and the
    /// result must be non-empty.
    pub fn from_days(days: &[Weekday]) -> Result<Self> {
        let mut set = [false; 5];
        for day in days {
            let slot = workweek_slot(*day).ok_or_else(|| {
                Error::InvalidFilter(format!("{} is not a working day", day))
            })?;
            set[slot] = true;
        }
        if !set.iter().any(|&included| included) {
            return Err(Error::InvalidFilter("weekday set must not be empty".into()));
        }
        Ok(Self { days: set })
    }

    /// Whether `day` is a member. Weekend days are never members.
    pub fn contains(&self, day: Weekday) -> bool {
        workweek_slot(day).map(|slot| self.days[slot]).unwrap_or(false)
    }

    /// Flip membership of `day`. Returns `true` if the set changed.
    ///
    /// Toggling off the last remaining member is a no-op, as is toggling a
    /// weekend day.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        let Some(slot) = workweek_slot(day) else {
            return false;
        };
        if self.days[slot] && self.len() == 1 {
            return false;
        }
        self.days[slot] = !self.days[slot];
        true
    }

    /// Number of members (1..=5).
    pub fn len(&self) -> usize {
        self.days.iter().filter(|&&included| included).count()
    }

    /// A non-empty set is an invariant, so this always returns `false`; kept
    /// for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Members in Monday-to-Friday order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WORKWEEK
            .iter()
            .copied()
            .filter(move |day| self.contains(*day))
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::full()
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

fn parse_weekday(label: &str) -> std::result::Result<Weekday, String> {
    match label.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        other => Err(format!("unknown weekday: {}", other)),
    }
}

impl TryFrom<Vec<String>> for WeekdaySet {
    type Error = String;

    fn try_from(labels: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let days = labels
            .iter()
            .map(|label| parse_weekday(label))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        WeekdaySet::from_days(&days).map_err(|e| e.to_string())
    }
}

impl From<WeekdaySet> for Vec<String> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().map(|day| weekday_label(day).to_string()).collect()
    }
}

/// Inclusive hour-of-day window, `0 <= start <= end <= 24`.
///
/// `end == 24` means "through the last instant of the day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl HourRange {
    pub fn new(start: u8, end: u8) -> Result<Self> {
        if start > end || end > 24 {
            return Err(Error::InvalidFilter(format!(
                "hour range {}..{} out of bounds",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The whole day, 0..24.
    pub fn full_day() -> Self {
        Self { start: 0, end: 24 }
    }

    pub fn validate(&self) -> Result<()> {
        Self::new(self.start, self.end).map(|_| ())
    }

    /// Whether a time of day falls inside the window (inclusive bounds).
    pub fn contains(&self, time: NaiveTime) -> bool {
        let hour = time.hour() as u8;
        if hour < self.start {
            return false;
        }
        if self.end == 24 {
            return true;
        }
        // The end bound is an instant: 17:00:00 is in, 17:00:01 is out.
        hour < self.end
            || (hour == self.end && time.minute() == 0 && time.second() == 0)
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self::full_day()
    }
}

/// Filter driving the historical activity drill-down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoricalSliceFilter {
    pub date_mode: DateMode,
    pub anchor_date: NaiveDate,
    #[serde(default)]
    pub weekdays: WeekdaySet,
    #[serde(default)]
    pub hour_range: HourRange,
}

impl HistoricalSliceFilter {
    pub fn validate(&self) -> Result<()> {
        self.hour_range.validate()
    }
}

// ============================================
// Drill-down metrics
// ============================================

/// Which aggregate cell a drill-down targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillDownMetric {
    Answered,
    DmConversations,
    Sqls,
}

impl DrillDownMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrillDownMetric::Answered => "answered",
            DrillDownMetric::DmConversations => "dm_conversations",
            DrillDownMetric::Sqls => "sqls",
        }
    }
}
