//! Working-day calendar arithmetic.
//!
//! Campaign pacing counts Monday–Friday calendar dates only; holidays are
//! deliberately ignored. All comparisons happen at day granularity.

use chrono::{Datelike, NaiveDate, Weekday};

/// Whether a date falls on a Monday–Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count working days in `[start, end]` inclusive.
///
/// Returns 0 when `start > end`.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        return 0;
    }

    let mut count = 0;
    let mut day = start;
    loop {
        if is_working_day(day) {
            count += 1;
        }
        if day >= end {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

/// Clamp a date into `[start, end]`.
pub fn clamp_to_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    if date < start {
        start
    } else if date > end {
        end
    } else {
        date
    }
}
