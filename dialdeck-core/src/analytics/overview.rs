//! Dashboard header KPIs: current-period totals, previous-period deltas,
//! conversion rates, and the funnel, bundled into one record.

use crate::types::{ActivityEvent, MeetingRecord, PeriodFilter};

use super::aggregate::{count_meetings, sum_events, ActivityTotals, EventScope};
use super::funnel::{build_funnel, FunnelStage};
use super::period::previous_period;
use super::ratios::{delta_with_cap, rate, DEFAULT_DELTA_SUPPRESSION_PCT};

/// One KPI cell: the current value and, when a comparison period exists,
/// the previous value and percentage change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiValue {
    pub current: i64,
    pub previous: Option<i64>,
    /// None when no comparison applies or the change is suppressed.
    pub delta_pct: Option<f64>,
}

impl KpiValue {
    fn new(current: i64, previous: Option<i64>, cap: f64) -> Self {
        Self {
            current,
            previous,
            delta_pct: delta_with_cap(current, previous, cap),
        }
    }
}

/// The KPI bundle the dashboard header renders for one client and period.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewKpis {
    pub dials: KpiValue,
    pub answered: KpiValue,
    pub dm_conversations: KpiValue,
    pub sqls: KpiValue,
    /// answered / dials, percent.
    pub answer_rate: f64,
    /// dm_conversations / answered, percent.
    pub dm_rate: f64,
    /// sqls / dials, percent.
    pub conversion_rate: f64,
    pub funnel: Vec<FunnelStage>,
}

/// [`build_overview_with_cap`] with the default delta suppression cap.
pub fn build_overview(
    events: &[ActivityEvent],
    meetings: &[MeetingRecord],
    filter: &PeriodFilter,
    client: Option<&str>,
) -> OverviewKpis {
    build_overview_with_cap(events, meetings, filter, client, DEFAULT_DELTA_SUPPRESSION_PCT)
}

/// Aggregate the current period, resolve the comparison period from the
/// filter tag, and attach deltas and the funnel.
///
/// A `custom` tag has no comparison period, so every delta is `None`.
pub fn build_overview_with_cap(
    events: &[ActivityEvent],
    meetings: &[MeetingRecord],
    filter: &PeriodFilter,
    client: Option<&str>,
    cap: f64,
) -> OverviewKpis {
    let current = totals_for(events, meetings, filter.from, filter.to, client);

    let previous = previous_period(filter.tag, filter.from, filter.to)
        .map(|(from, to)| totals_for(events, meetings, from, to, client));

    tracing::debug!(
        period = filter.tag.as_str(),
        from = %filter.from,
        to = %filter.to,
        dials = current.dials,
        compared = previous.is_some(),
        "Built overview KPIs"
    );

    OverviewKpis {
        dials: KpiValue::new(current.dials, previous.map(|p| p.dials), cap),
        answered: KpiValue::new(current.answered, previous.map(|p| p.answered), cap),
        dm_conversations: KpiValue::new(
            current.dm_conversations,
            previous.map(|p| p.dm_conversations),
            cap,
        ),
        sqls: KpiValue::new(current.sqls, previous.map(|p| p.sqls), cap),
        answer_rate: rate(current.answered, current.dials),
        dm_rate: rate(current.dm_conversations, current.answered),
        conversion_rate: rate(current.sqls, current.dials),
        funnel: build_funnel(&current),
    }
}

fn totals_for(
    events: &[ActivityEvent],
    meetings: &[MeetingRecord],
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
    client: Option<&str>,
) -> ActivityTotals {
    let mut scope = EventScope::new().date_range(from, to);
    if let Some(client) = client {
        scope = scope.client(client);
    }
    let totals = sum_events(events, &scope);
    totals.with_sqls(count_meetings(meetings, &scope))
}
