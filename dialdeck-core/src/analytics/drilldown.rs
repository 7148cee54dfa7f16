//! Record-level drill-down behind aggregate cells.
//!
//! Given the same scope used to produce an aggregate cell, returns the exact
//! underlying rows. The row count must equal the aggregate value shown for
//! that cell; any mismatch is a correctness bug, not a cosmetic one.

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::{ActivityEvent, DrillDownMetric, HistoricalSliceFilter, MeetingRecord};

use super::aggregate::EventScope;
use super::slice::resolve_slice;

/// Scope identifying one aggregate cell: a performer, a metric, and the
/// filter the aggregate was built with.
#[derive(Debug, Clone)]
pub struct DrillDownScope {
    pub metric: DrillDownMetric,
    pub scope: EventScope,
}

impl DrillDownScope {
    /// Scope for a cell on the live "today" board.
    pub fn today(performer: impl Into<String>, metric: DrillDownMetric, date: NaiveDate) -> Self {
        Self {
            metric,
            scope: EventScope::new().performer(performer).date_range(date, date),
        }
    }

    /// Scope for a cell built from a historical slice filter.
    ///
    /// Carries the full filter (instants, weekday set, hour range), not just
    /// the timestamp pair, so interior days and hours excluded by the filter
    /// are excluded here too.
    pub fn historical(
        performer: impl Into<String>,
        metric: DrillDownMetric,
        filter: &HistoricalSliceFilter,
    ) -> Result<Self> {
        let window = resolve_slice(filter)?;
        Ok(Self {
            metric,
            scope: EventScope::new()
                .performer(performer)
                .between(window.starts_at, window.ends_at)
                .weekdays(filter.weekdays)
                .hours(filter.hour_range),
        })
    }
}

/// Rows behind an aggregate cell. Answered and DM cells resolve to raw
/// events; SQL cells resolve to bookings.
#[derive(Debug, Clone)]
pub enum DrillDownRows {
    Events(Vec<ActivityEvent>),
    Meetings(Vec<MeetingRecord>),
}

impl DrillDownRows {
    pub fn len(&self) -> usize {
        match self {
            DrillDownRows::Events(rows) => rows.len(),
            DrillDownRows::Meetings(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Select the rows behind an aggregate cell, most recent first.
///
/// Events sort by `occurred_at` descending; bookings by `booking_date`
/// descending. Ties break on id descending so the order is deterministic.
pub fn select_records(
    cell: &DrillDownScope,
    events: &[ActivityEvent],
    meetings: &[MeetingRecord],
) -> DrillDownRows {
    match cell.metric {
        DrillDownMetric::Answered => {
            DrillDownRows::Events(select_events(cell, events, |e| e.is_answered()))
        }
        DrillDownMetric::DmConversations => {
            DrillDownRows::Events(select_events(cell, events, |e| e.is_dm_conversation()))
        }
        DrillDownMetric::Sqls => {
            let mut rows: Vec<MeetingRecord> = meetings
                .iter()
                .filter(|meeting| cell.scope.matches_meeting(meeting))
                .cloned()
                .collect();
            rows.sort_by(|a, b| {
                b.booking_date
                    .cmp(&a.booking_date)
                    .then_with(|| b.id.cmp(&a.id))
            });
            DrillDownRows::Meetings(rows)
        }
    }
}

fn select_events(
    cell: &DrillDownScope,
    events: &[ActivityEvent],
    counts: impl Fn(&ActivityEvent) -> bool,
) -> Vec<ActivityEvent> {
    let mut rows: Vec<ActivityEvent> = events
        .iter()
        .filter(|event| cell.scope.matches(event) && counts(event))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    rows
}
