//! Historical slice resolution for the activity monitor.
//!
//! Expands a (date-mode, anchor, weekday-set, hour-range) filter into the
//! concrete calendar dates it covers plus an inclusive instant pair, so the
//! caller can re-query the store and the aggregator can re-apply the same
//! predicate.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::types::{DateMode, HistoricalSliceFilter};

use super::period::{first_of_month, last_of_month};

/// Concrete window a slice filter resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceWindow {
    /// Calendar dates covered, ascending.
    pub dates: Vec<NaiveDate>,
    /// First instant of the window (first date at the hour-range start).
    pub starts_at: DateTime<Utc>,
    /// Last instant of the window (last date at the hour-range end; an end
    /// hour of 24 means the last instant of that day).
    pub ends_at: DateTime<Utc>,
}

/// Instant for `date` at `hour`; 24 maps to the last instant of the day.
fn instant_at(date: NaiveDate, hour: u8) -> DateTime<Utc> {
    if hour >= 24 {
        date.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
    } else {
        date.and_hms_opt(hour as u32, 0, 0).unwrap().and_utc()
    }
}

/// Resolve a slice filter into its dates and instant bounds.
///
/// - `day` mode covers the single anchor date.
/// - `week` mode covers the Monday-start week containing the anchor,
///   filtered to the weekday set.
/// - `month` mode covers the anchor's calendar month, filtered the same way.
pub fn resolve_slice(filter: &HistoricalSliceFilter) -> Result<SliceWindow> {
    filter.validate()?;

    let dates: Vec<NaiveDate> = match filter.date_mode {
        DateMode::Day => vec![filter.anchor_date],
        DateMode::Week => {
            let monday = filter.anchor_date
                - Duration::days(filter.anchor_date.weekday().num_days_from_monday() as i64);
            (0..7)
                .filter_map(|offset| monday.checked_add_signed(Duration::days(offset)))
                .filter(|date| filter.weekdays.contains(date.weekday()))
                .collect()
        }
        DateMode::Month => {
            let first = first_of_month(filter.anchor_date).ok_or_else(|| {
                Error::InvalidFilter(format!("no month start for {}", filter.anchor_date))
            })?;
            let last = last_of_month(filter.anchor_date).ok_or_else(|| {
                Error::InvalidFilter(format!("no month end for {}", filter.anchor_date))
            })?;
            let mut dates = Vec::new();
            let mut day = first;
            while day <= last {
                if filter.weekdays.contains(day.weekday()) {
                    dates.push(day);
                }
                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }
            dates
        }
    };

    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        // Unreachable while the weekday set is non-empty; a week or month
        // always contains every working day at least once.
        return Err(Error::InvalidFilter(
            "slice filter resolves to no dates".to_string(),
        ));
    };

    tracing::debug!(
        mode = filter.date_mode.as_str(),
        anchor = %filter.anchor_date,
        days = dates.len(),
        "Resolved historical slice"
    );

    Ok(SliceWindow {
        starts_at: instant_at(first, filter.hour_range.start),
        ends_at: instant_at(last, filter.hour_range.end),
        dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HourRange, WeekdaySet};
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filter(mode: DateMode, anchor: NaiveDate) -> HistoricalSliceFilter {
        HistoricalSliceFilter {
            date_mode: mode,
            anchor_date: anchor,
            weekdays: WeekdaySet::full(),
            hour_range: HourRange::full_day(),
        }
    }

    #[test]
    fn day_mode_is_the_anchor_alone() {
        let window = resolve_slice(&filter(DateMode::Day, date(2025, 10, 8))).unwrap();
        assert_eq!(window.dates, vec![date(2025, 10, 8)]);
        assert_eq!(window.starts_at, "2025-10-08T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(
            window.ends_at,
            "2025-10-08T23:59:59.999Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn week_mode_starts_on_monday() {
        // Wednesday Oct 8 anchors the week of Mon Oct 6 .. Fri Oct 10.
        let window = resolve_slice(&filter(DateMode::Week, date(2025, 10, 8))).unwrap();
        assert_eq!(
            window.dates,
            vec![
                date(2025, 10, 6),
                date(2025, 10, 7),
                date(2025, 10, 8),
                date(2025, 10, 9),
                date(2025, 10, 10),
            ]
        );
    }

    #[test]
    fn week_mode_honors_weekday_subset() {
        let mut f = filter(DateMode::Week, date(2025, 10, 8));
        f.weekdays = WeekdaySet::from_days(&[Weekday::Mon, Weekday::Fri]).unwrap();
        let window = resolve_slice(&f).unwrap();
        assert_eq!(window.dates, vec![date(2025, 10, 6), date(2025, 10, 10)]);
    }

    #[test]
    fn weekend_anchor_still_resolves_its_week() {
        // Saturday Oct 11 belongs to the week of Mon Oct 6.
        let window = resolve_slice(&filter(DateMode::Week, date(2025, 10, 11))).unwrap();
        assert_eq!(window.dates.first(), Some(&date(2025, 10, 6)));
        assert_eq!(window.dates.last(), Some(&date(2025, 10, 10)));
    }

    #[test]
    fn month_mode_covers_working_days_of_month() {
        let window = resolve_slice(&filter(DateMode::Month, date(2025, 10, 15))).unwrap();
        // October 2025 has 23 working days.
        assert_eq!(window.dates.len(), 23);
        assert_eq!(window.dates.first(), Some(&date(2025, 10, 1)));
        assert_eq!(window.dates.last(), Some(&date(2025, 10, 31)));
    }

    #[test]
    fn hour_range_shapes_the_instant_bounds() {
        let mut f = filter(DateMode::Week, date(2025, 10, 8));
        f.hour_range = HourRange::new(9, 17).unwrap();
        let window = resolve_slice(&f).unwrap();
        assert_eq!(window.starts_at, "2025-10-06T09:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(window.ends_at, "2025-10-10T17:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn end_hour_24_maps_to_last_instant() {
        let mut f = filter(DateMode::Day, date(2025, 10, 8));
        f.hour_range = HourRange::new(9, 24).unwrap();
        let window = resolve_slice(&f).unwrap();
        assert_eq!(
            window.ends_at,
            "2025-10-08T23:59:59.999Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn invalid_hour_range_is_rejected() {
        let mut f = filter(DateMode::Day, date(2025, 10, 8));
        f.hour_range = HourRange { start: 18, end: 9 };
        assert!(resolve_slice(&f).is_err());
    }

    #[test]
    fn dates_are_ascending() {
        let window = resolve_slice(&filter(DateMode::Month, date(2025, 10, 15))).unwrap();
        let mut sorted = window.dates.clone();
        sorted.sort();
        assert_eq!(window.dates, sorted);
    }
}
