//! RFC 5545 RRULE rendering for validated series (RFC 5545 §3.3.10).

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::rule::core::{Frequency, Series, Termination, Weekday};

/// Highest day of month that exists in every month, so no clamping applies.
const UNCLAMPED_DAY_LIMIT: u32 = 28;

/// Recurrence rule in the subset of RFC 5545 a series can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRule {
    /// Recurrence frequency.
    pub freq: Frequency,

    /// Recurrence interval; only written when not 1.
    pub interval: u32,

    /// Last allowed date, written as the end of that day in UTC.
    pub until: Option<NaiveDate>,

    /// Number of occurrences (mutually exclusive with until).
    pub count: Option<u32>,

    /// Week start day.
    pub wkst: Option<Weekday>,

    /// By-day list.
    pub by_day: Vec<Weekday>,

    /// By-monthday list.
    pub by_monthday: Vec<u32>,
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("FREQ={}", self.freq)];

        if self.interval != 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }

        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}T235959Z", until.format("%Y%m%d")));
        }

        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }

        if let Some(wkst) = self.wkst {
            parts.push(format!("WKST={wkst}"));
        }

        if !self.by_day.is_empty() {
            let s: Vec<_> = self.by_day.iter().map(ToString::to_string).collect();
            parts.push(format!("BYDAY={}", s.join(",")));
        }

        if !self.by_monthday.is_empty() {
            let s: Vec<_> = self.by_monthday.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTHDAY={}", s.join(",")));
        }

        write!(f, "{}", parts.join(";"))
    }
}

impl Series {
    /// ## Summary
    /// Expresses the series as an RRULE, anchored at the series start.
    ///
    /// Returns `None` when an RRULE would not produce exactly the same dates:
    /// - weekly with weekdays that do not include the start's weekday
    /// - monthly where the start day differs from the pinned day, or the day
    ///   is past the 28th (RRULE skips short months instead of clamping)
    /// - yearly starting on February 29
    #[must_use]
    pub fn to_rrule(&self) -> Option<RRule> {
        let start = self.start();
        let mut rrule = RRule {
            freq: self.frequency(),
            interval: self.interval(),
            until: None,
            count: None,
            wkst: None,
            by_day: Vec::new(),
            by_monthday: Vec::new(),
        };

        match self.frequency() {
            Frequency::Daily => {}
            Frequency::Weekly => {
                if !self.weekdays().is_empty() {
                    if !self.weekdays().contains(&Weekday::of(start)) {
                        return None;
                    }
                    // Week blocks start on Sunday
                    rrule.wkst = Some(Weekday::Sunday);
                    rrule.by_day = self.weekdays().to_vec();
                }
            }
            Frequency::Monthly => {
                let day = self.day_of_month().unwrap_or_else(|| start.day());
                if day != start.day() || day > UNCLAMPED_DAY_LIMIT {
                    return None;
                }
                if self.day_of_month().is_some() {
                    rrule.by_monthday = vec![day];
                }
            }
            Frequency::Yearly => {
                if start.month() == 2 && start.day() == 29 {
                    return None;
                }
            }
        }

        match self.termination() {
            Termination::Never => {}
            Termination::Until(date) => rrule.until = Some(date),
            Termination::Count(count) => rrule.count = Some(count),
        }

        Some(rrule)
    }
}
