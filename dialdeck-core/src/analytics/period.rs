//! Period resolution for the dashboard quick filters.
//!
//! Rolling windows (`last7days`, `last30days`) compare against a fixed-length
//! shift; month-aligned windows compare against the preceding calendar month;
//! custom ranges have no comparison at all. The asymmetry is deliberate and
//! must not be collapsed into a single "shift by range length" rule.

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::PeriodTag;

/// First day of `date`'s month.
pub(crate) fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

/// Full span of the calendar month immediately before `date`'s month.
pub(crate) fn month_before(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = first_of_month(date)?;
    let prev_last = first.pred_opt()?;
    let prev_first = first_of_month(prev_last)?;
    Some((prev_first, prev_last))
}

/// Last day of `date`'s month.
pub(crate) fn last_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month?.pred_opt()
}

/// Resolve a quick-filter tag to its concrete date range as of `today`.
///
/// `Custom` has no implied range; the caller supplies its own bounds.
/// `ThisMonth` runs from the first of the month through today, not through
/// month end, matching what the dashboard displays mid-month.
pub fn current_period(tag: PeriodTag, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match tag {
        PeriodTag::Last7Days => Some((today - Duration::days(6), today)),
        PeriodTag::Last30Days => Some((today - Duration::days(29), today)),
        PeriodTag::ThisMonth => Some((first_of_month(today)?, today)),
        PeriodTag::LastMonth => month_before(today),
        PeriodTag::Custom => None,
    }
}

/// Resolve the previous-period range used for "vs previous period" deltas.
///
/// Given the tag and the current resolved `[from, to]`:
/// - `last7days` / `last30days`: both bounds shifted back by the window length
/// - `this_month` / `last_month`: the full calendar month before `from`'s month
/// - `custom`: no defined predecessor (comparison suppressed)
pub fn previous_period(
    tag: PeriodTag,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    match tag {
        PeriodTag::Last7Days => Some((from - Duration::days(7), to - Duration::days(7))),
        PeriodTag::Last30Days => Some((from - Duration::days(30), to - Duration::days(30))),
        PeriodTag::ThisMonth | PeriodTag::LastMonth => month_before(from),
        PeriodTag::Custom => None,
    }
}

/// Number of days in the inclusive range, for display purposes.
pub fn range_days(from: NaiveDate, to: NaiveDate) -> i64 {
    if from > to {
        return 0;
    }
    (to - from).num_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn last7days_shifts_back_a_week() {
        let (from, to) =
            previous_period(PeriodTag::Last7Days, date(2025, 10, 7), date(2025, 10, 13)).unwrap();
        assert_eq!(from, date(2025, 9, 30));
        assert_eq!(to, date(2025, 10, 6));
    }

    #[test]
    fn last30days_shifts_back_thirty() {
        let (from, to) =
            previous_period(PeriodTag::Last30Days, date(2025, 9, 14), date(2025, 10, 13)).unwrap();
        assert_eq!(from, date(2025, 8, 15));
        assert_eq!(to, date(2025, 9, 13));
    }

    #[test]
    fn this_month_compares_against_full_prior_month() {
        // Mid-October range compares against all of September, not a
        // 13-day shifted window.
        let (from, to) =
            previous_period(PeriodTag::ThisMonth, date(2025, 10, 1), date(2025, 10, 13)).unwrap();
        assert_eq!(from, date(2025, 9, 1));
        assert_eq!(to, date(2025, 9, 30));
    }

    #[test]
    fn last_month_compares_against_month_before_that() {
        let (from, to) =
            previous_period(PeriodTag::LastMonth, date(2025, 9, 1), date(2025, 9, 30)).unwrap();
        assert_eq!(from, date(2025, 8, 1));
        assert_eq!(to, date(2025, 8, 31));
    }

    #[test]
    fn month_rollover_across_year_boundary() {
        let (from, to) =
            previous_period(PeriodTag::ThisMonth, date(2026, 1, 1), date(2026, 1, 15)).unwrap();
        assert_eq!(from, date(2025, 12, 1));
        assert_eq!(to, date(2025, 12, 31));
    }

    #[test]
    fn custom_has_no_previous_period() {
        assert!(previous_period(PeriodTag::Custom, date(2025, 10, 1), date(2025, 10, 13)).is_none());
    }

    #[test]
    fn current_period_quick_filters() {
        let today = date(2025, 10, 13);
        assert_eq!(
            current_period(PeriodTag::Last7Days, today),
            Some((date(2025, 10, 7), today))
        );
        assert_eq!(
            current_period(PeriodTag::Last30Days, today),
            Some((date(2025, 9, 14), today))
        );
        assert_eq!(
            current_period(PeriodTag::ThisMonth, today),
            Some((date(2025, 10, 1), today))
        );
        assert_eq!(
            current_period(PeriodTag::LastMonth, today),
            Some((date(2025, 9, 1), date(2025, 9, 30)))
        );
        assert_eq!(current_period(PeriodTag::Custom, today), None);
    }

    #[test]
    fn range_days_is_inclusive() {
        assert_eq!(range_days(date(2025, 10, 7), date(2025, 10, 13)), 7);
        assert_eq!(range_days(date(2025, 10, 13), date(2025, 10, 13)), 1);
        assert_eq!(range_days(date(2025, 10, 14), date(2025, 10, 13)), 0);
    }

    #[test]
    fn last_of_month_handles_december() {
        assert_eq!(last_of_month(date(2025, 12, 5)), Some(date(2025, 12, 31)));
        assert_eq!(last_of_month(date(2024, 2, 1)), Some(date(2024, 2, 29)));
    }
}
