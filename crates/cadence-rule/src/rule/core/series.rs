//! A validated recurrence series anchored at its start date.

use std::fmt;

use chrono::NaiveDate;

use super::{Frequency, Weekday};

/// When a validated series stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// No logical end; only a preview cap bounds expansion.
    Never,
    /// Last allowed date, inclusive.
    Until(NaiveDate),
    /// Total number of occurrences, including the start date.
    Count(u32),
}

/// A recurrence pattern that passed validation against its start date.
///
/// Only the validator constructs this, so holding a `Series` means the
/// interval is positive, weekdays are sorted and unique, and the termination
/// is consistent with the start date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Series {
    start: NaiveDate,
    frequency: Frequency,
    interval: u32,
    weekdays: Vec<Weekday>,
    day_of_month: Option<u32>,
    termination: Termination,
}

impl Series {
    pub(crate) fn new(
        start: NaiveDate,
        frequency: Frequency,
        interval: u32,
        weekdays: Vec<Weekday>,
        day_of_month: Option<u32>,
        termination: Termination,
    ) -> Self {
        Self {
            start,
            frequency,
            interval,
            weekdays,
            day_of_month,
            termination,
        }
    }

    /// The anchor: first occurrence of the series.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Step multiplier, always at least 1.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Selected weekdays in ascending order; empty unless the series is weekly.
    #[must_use]
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Pinned day of month; `None` unless the series is monthly.
    #[must_use]
    pub fn day_of_month(&self) -> Option<u32> {
        self.day_of_month
    }

    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.frequency.unit();
        if self.interval == 1 {
            write!(f, "Every {unit}")?;
        } else {
            write!(f, "Every {} {unit}s", self.interval)?;
        }

        if !self.weekdays.is_empty() {
            let names: Vec<_> = self.weekdays.iter().map(|d| d.short_name()).collect();
            write!(f, " on {}", names.join(", "))?;
        }

        if let Some(day) = self.day_of_month {
            write!(f, " on day {day}")?;
        }

        match self.termination {
            Termination::Never => write!(f, ", forever"),
            Termination::Until(date) => write!(f, ", until {date}"),
            Termination::Count(count) => write!(f, ", {count} times"),
        }
    }
}
