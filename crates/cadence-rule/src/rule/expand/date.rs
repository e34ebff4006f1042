//! Calendar arithmetic on naive dates.
//!
//! All helpers return `None` instead of panicking when a result falls outside
//! the range `NaiveDate` can represent.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::rule::core::Weekday;

/// Number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    next.pred_opt().map(|last| last.day())
}

/// ## Summary
/// Moves `anchor` forward by `months` and places the result on `day`.
///
/// When the target month is shorter than `day`, the result is clamped to
/// that month's last day (Jan 31 + 1 month with day 31 gives Feb 28/29).
#[must_use]
pub fn add_months_on_day(anchor: NaiveDate, months: u32, day: u32) -> Option<NaiveDate> {
    let first = anchor.with_day(1)?.checked_add_months(Months::new(months))?;
    let last = days_in_month(first.year(), first.month())?;
    first.with_day(day.min(last))
}

/// Adds whole days.
#[must_use]
pub fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// ## Summary
/// Next date after `current` that falls on one of `weekdays`.
///
/// Looks for a later listed weekday in the same Sunday-based week first. If
/// none is left, jumps `interval` weeks ahead to the first listed weekday.
/// `weekdays` must be sorted ascending and non-empty.
#[must_use]
pub fn next_listed_weekday(
    current: NaiveDate,
    weekdays: &[Weekday],
    interval: u32,
) -> Option<NaiveDate> {
    let today = Weekday::of(current).index();
    let offset = if let Some(later) = weekdays.iter().map(|d| d.index()).find(|&d| d > today) {
        u64::from(later - today)
    } else {
        let first = weekdays.first()?.index();
        7 * u64::from(interval) - u64::from(today) + u64::from(first)
    };
    add_days(current, offset)
}
