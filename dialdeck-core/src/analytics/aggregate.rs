//! Scoped aggregation of raw events and daily snapshots.
//!
//! Aggregation is a single fold over the input rows: filter by a scope,
//! then sum counters with nulls treated as zero. The fold is associative and
//! commutative with respect to row order, so chunked or paginated fetches can
//! be summed incrementally by merging partial totals.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{ActivityEvent, DailySnapshot, HourRange, MeetingRecord, WeekdaySet};

// ============================================
// Totals
// ============================================

/// Summed call-activity counters for a scope.
///
/// `sqls` is only populated when the source carries bookings (snapshots, or
/// events merged with a meeting count); a pure event fold leaves it at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityTotals {
    pub dials: i64,
    pub answered: i64,
    pub dm_conversations: i64,
    pub sqls: i64,
}

impl ActivityTotals {
    /// Merge partial totals from another chunk of rows.
    pub fn merge(&mut self, other: &ActivityTotals) {
        self.dials += other.dials;
        self.answered += other.answered;
        self.dm_conversations += other.dm_conversations;
        self.sqls += other.sqls;
    }

    /// The same totals with `sqls` replaced by a booking count.
    pub fn with_sqls(mut self, sqls: i64) -> Self {
        self.sqls = sqls;
        self
    }
}

/// Summed snapshot counters for a scope (one field per snapshot column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotTotals {
    pub dials: i64,
    pub answered: i64,
    pub dms_reached: i64,
    pub mqls: i64,
    pub sqls: i64,
}

impl SnapshotTotals {
    pub fn merge(&mut self, other: &SnapshotTotals) {
        self.dials += other.dials;
        self.answered += other.answered;
        self.dms_reached += other.dms_reached;
        self.mqls += other.mqls;
        self.sqls += other.sqls;
    }
}

impl From<SnapshotTotals> for ActivityTotals {
    fn from(totals: SnapshotTotals) -> Self {
        ActivityTotals {
            dials: totals.dials,
            answered: totals.answered,
            dm_conversations: totals.dms_reached,
            sqls: totals.sqls,
        }
    }
}

// ============================================
// Scopes
// ============================================

/// Predicate over activity-event attributes.
///
/// Every dimension is optional; an empty scope matches all rows. Date bounds
/// come in two precisions: day-granularity `from`/`to` (dashboard period
/// filters) and instant-granularity `starts_at`/`ends_at` (historical slice
/// windows). When both are set, both must hold.
#[derive(Debug, Clone, Default)]
pub struct EventScope {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub client: Option<String>,
    pub performer: Option<String>,
    pub weekdays: Option<WeekdaySet>,
    pub hours: Option<HourRange>,
}

impl EventScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to calendar dates in `[from, to]` inclusive.
    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Restrict to instants in `[starts_at, ends_at]` inclusive.
    pub fn between(mut self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn performer(mut self, performer: impl Into<String>) -> Self {
        self.performer = Some(performer.into());
        self
    }

    pub fn weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = Some(weekdays);
        self
    }

    pub fn hours(mut self, hours: HourRange) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Whether an event satisfies every set dimension.
    pub fn matches(&self, event: &ActivityEvent) -> bool {
        let date = event.occurred_on();
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        if let Some(starts_at) = self.starts_at {
            if event.occurred_at < starts_at {
                return false;
            }
        }
        if let Some(ends_at) = self.ends_at {
            if event.occurred_at > ends_at {
                return false;
            }
        }
        if let Some(client) = &self.client {
            if event.client.as_deref() != Some(client.as_str()) {
                return false;
            }
        }
        if let Some(performer) = &self.performer {
            if event.performer != *performer {
                return false;
            }
        }
        if let Some(weekdays) = &self.weekdays {
            use chrono::Datelike;
            if !weekdays.contains(date.weekday()) {
                return false;
            }
        }
        if let Some(hours) = &self.hours {
            if !hours.contains(event.occurred_at.time()) {
                return false;
            }
        }
        true
    }

    /// Day-granularity bounds implied by this scope, combining date and
    /// instant filters. Used for date-only rows (snapshots, bookings).
    pub fn date_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let from = match (self.from, self.starts_at.map(|t| t.date_naive())) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let to = match (self.to, self.ends_at.map(|t| t.date_naive())) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        (from, to)
    }

    /// Whether a booking satisfies the scope at day granularity.
    pub fn matches_meeting(&self, meeting: &MeetingRecord) -> bool {
        let (from, to) = self.date_bounds();
        if let Some(from) = from {
            if meeting.booking_date < from {
                return false;
            }
        }
        if let Some(to) = to {
            if meeting.booking_date > to {
                return false;
            }
        }
        if let Some(client) = &self.client {
            if meeting.client.as_deref() != Some(client.as_str()) {
                return false;
            }
        }
        if let Some(performer) = &self.performer {
            if meeting.performer != *performer {
                return false;
            }
        }
        if let Some(weekdays) = &self.weekdays {
            use chrono::Datelike;
            if !weekdays.contains(meeting.booking_date.weekday()) {
                return false;
            }
        }
        true
    }
}

/// Predicate over snapshot attributes (day granularity only).
#[derive(Debug, Clone, Default)]
pub struct SnapshotScope {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub client: Option<String>,
    pub performer: Option<String>,
    pub weekdays: Option<WeekdaySet>,
}

impl SnapshotScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn performer(mut self, performer: impl Into<String>) -> Self {
        self.performer = Some(performer.into());
        self
    }

    pub fn weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = Some(weekdays);
        self
    }

    pub fn matches(&self, snapshot: &DailySnapshot) -> bool {
        if let Some(from) = self.from {
            if snapshot.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if snapshot.date > to {
                return false;
            }
        }
        if let Some(client) = &self.client {
            if snapshot.client.as_deref() != Some(client.as_str()) {
                return false;
            }
        }
        if let Some(performer) = &self.performer {
            if snapshot.performer != *performer {
                return false;
            }
        }
        if let Some(weekdays) = &self.weekdays {
            use chrono::Datelike;
            if !weekdays.contains(snapshot.date.weekday()) {
                return false;
            }
        }
        true
    }
}

// ============================================
// Folds
// ============================================

/// Sum call counters over the events matching `scope`.
///
/// `sqls` stays zero; bookings are counted by [`count_meetings`].
pub fn sum_events(events: &[ActivityEvent], scope: &EventScope) -> ActivityTotals {
    let mut totals = ActivityTotals::default();
    for event in events {
        if !scope.matches(event) {
            continue;
        }
        totals.dials += 1;
        if event.is_answered() {
            totals.answered += 1;
        }
        if event.is_dm_conversation() {
            totals.dm_conversations += 1;
        }
    }
    totals
}

/// Count bookings matching `scope` at day granularity.
pub fn count_meetings(meetings: &[MeetingRecord], scope: &EventScope) -> i64 {
    meetings
        .iter()
        .filter(|meeting| scope.matches_meeting(meeting))
        .count() as i64
}

/// Sum snapshot counters over the rollups matching `scope`, nulls as zero.
pub fn sum_snapshots(snapshots: &[DailySnapshot], scope: &SnapshotScope) -> SnapshotTotals {
    let mut totals = SnapshotTotals::default();
    for snapshot in snapshots {
        if !scope.matches(snapshot) {
            continue;
        }
        totals.dials += snapshot.dials_or_zero();
        totals.answered += snapshot.answered_or_zero();
        totals.dms_reached += snapshot.dms_reached_or_zero();
        totals.mqls += snapshot.mqls_or_zero();
        totals.sqls += snapshot.sqls_or_zero();
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MeetingStatus;
    use chrono::Weekday;

    fn event(id: &str, ts: &str, performer: &str, outcome: Option<&str>, dm: bool) -> ActivityEvent {
        ActivityEvent {
            id: id.to_string(),
            occurred_at: ts.parse().unwrap(),
            performer: performer.to_string(),
            client: Some("acme".to_string()),
            contact: None,
            company: None,
            outcome: outcome.map(|s| s.to_string()),
            duration_seconds: None,
            is_decision_maker: Some(dm),
        }
    }

    fn sample_events() -> Vec<ActivityEvent> {
        vec![
            event("e1", "2025-10-06T09:15:00Z", "Dana Cole", Some("connected"), true),
            event("e2", "2025-10-06T10:40:00Z", "Dana Cole", Some("voicemail"), false),
            event("e3", "2025-10-07T11:05:00Z", "Riley Fox", Some("Connected"), false),
            event("e4", "2025-10-08T15:30:00Z", "Dana Cole", Some("connected"), false),
            event("e5", "2025-10-11T09:00:00Z", "Riley Fox", None, false),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unscoped_fold_counts_everything() {
        let totals = sum_events(&sample_events(), &EventScope::new());
        assert_eq!(totals.dials, 5);
        assert_eq!(totals.answered, 3);
        assert_eq!(totals.dm_conversations, 1);
        assert_eq!(totals.sqls, 0);
    }

    #[test]
    fn fold_is_order_independent() {
        let mut events = sample_events();
        let forward = sum_events(&events, &EventScope::new());
        events.reverse();
        let backward = sum_events(&events, &EventScope::new());
        assert_eq!(forward, backward);
    }

    #[test]
    fn chunked_folds_merge_to_the_same_totals() {
        let events = sample_events();
        let whole = sum_events(&events, &EventScope::new());

        let mut merged = sum_events(&events[..2], &EventScope::new());
        merged.merge(&sum_events(&events[2..], &EventScope::new()));
        assert_eq!(whole, merged);
    }

    #[test]
    fn performer_and_date_scope() {
        let scope = EventScope::new()
            .performer("Dana Cole")
            .date_range(date(2025, 10, 6), date(2025, 10, 7));
        let totals = sum_events(&sample_events(), &scope);
        assert_eq!(totals.dials, 2);
        assert_eq!(totals.answered, 1);
    }

    #[test]
    fn weekday_scope_drops_weekend_rows() {
        // e5 falls on Saturday Oct 11.
        let scope = EventScope::new().weekdays(WeekdaySet::full());
        let totals = sum_events(&sample_events(), &scope);
        assert_eq!(totals.dials, 4);
    }

    #[test]
    fn hour_scope_applies_to_time_of_day() {
        let scope = EventScope::new().hours(HourRange::new(9, 11).unwrap());
        let totals = sum_events(&sample_events(), &scope);
        // 09:15, 10:40, 09:00 are in; 11:05 and 15:30 are out.
        assert_eq!(totals.dials, 3);
    }

    #[test]
    fn instant_bounds_are_inclusive() {
        let scope = EventScope::new().between(
            "2025-10-06T09:15:00Z".parse().unwrap(),
            "2025-10-07T11:05:00Z".parse().unwrap(),
        );
        let totals = sum_events(&sample_events(), &scope);
        assert_eq!(totals.dials, 3);
    }

    #[test]
    fn snapshot_fold_sums_with_nulls_as_zero() {
        let snaps = vec![
            DailySnapshot {
                date: date(2025, 10, 6),
                performer: "Dana Cole".to_string(),
                client: Some("acme".to_string()),
                dials: Some(30),
                answered: Some(6),
                dms_reached: Some(2),
                mqls: None,
                sqls: Some(1),
            },
            DailySnapshot {
                date: date(2025, 10, 7),
                performer: "Dana Cole".to_string(),
                client: Some("acme".to_string()),
                dials: Some(25),
                answered: None,
                dms_reached: None,
                mqls: None,
                sqls: None,
            },
        ];
        let totals = sum_snapshots(&snaps, &SnapshotScope::new().performer("Dana Cole"));
        assert_eq!(totals.dials, 55);
        assert_eq!(totals.answered, 6);
        assert_eq!(totals.dms_reached, 2);
        assert_eq!(totals.sqls, 1);

        let activity: ActivityTotals = totals.into();
        assert_eq!(activity.dm_conversations, 2);
    }

    #[test]
    fn meeting_count_uses_day_granularity() {
        let meetings = vec![
            MeetingRecord {
                id: "m1".to_string(),
                booking_date: date(2025, 10, 6),
                meeting_date: None,
                client: Some("acme".to_string()),
                contact: None,
                company: None,
                performer: "Dana Cole".to_string(),
                status: MeetingStatus::Pending,
                notes: None,
            },
            MeetingRecord {
                id: "m2".to_string(),
                booking_date: date(2025, 10, 9),
                meeting_date: None,
                client: Some("acme".to_string()),
                contact: None,
                company: None,
                performer: "Riley Fox".to_string(),
                status: MeetingStatus::Held,
                notes: None,
            },
        ];
        let scope = EventScope::new().date_range(date(2025, 10, 6), date(2025, 10, 8));
        assert_eq!(count_meetings(&meetings, &scope), 1);
        assert_eq!(count_meetings(&meetings, &EventScope::new()), 2);
        assert_eq!(
            count_meetings(&meetings, &EventScope::new().performer("Riley Fox")),
            1
        );
    }

    #[test]
    fn weekday_scope_uses_monday_based_set() {
        let mut mondays_only = WeekdaySet::full();
        for day in [Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            mondays_only.toggle(day);
        }
        let scope = EventScope::new().weekdays(mondays_only);
        let totals = sum_events(&sample_events(), &scope);
        // Only the two Monday Oct 6 events remain.
        assert_eq!(totals.dials, 2);
    }
}
