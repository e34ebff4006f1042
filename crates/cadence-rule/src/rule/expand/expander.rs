//! Occurrence expansion for validated recurrence series.
//!
//! Each step builds a fresh date from the previous occurrence (daily and
//! weekly) or from the anchor and the step number (monthly and yearly), so a
//! month-end clamp never shifts later occurrences.

use cadence_core::constants::MAX_ITERATIONS;
use chrono::{Datelike, NaiveDate};

use super::date;
use crate::rule::core::{Frequency, Series, Termination};

/// Error during occurrence expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    /// Full expansion requested for a series with no end.
    #[error("Series never ends and cannot be expanded in full")]
    Unbounded,

    /// Expansion needed more steps than the configured bound.
    #[error("Expansion exceeded maximum limit of {0} iterations")]
    IterationLimitExceeded(usize),

    /// The next occurrence is not a representable date.
    #[error("Occurrence after {0} is outside the supported date range")]
    DateOutOfRange(NaiveDate),
}

/// How much of a series to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// At most this many occurrences, for display. The series may logically
    /// continue past the returned list.
    Preview(usize),
    /// Every occurrence of a terminating series.
    Full,
}

/// Options for occurrence expansion.
///
/// There is no default: callers always pick a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    pub mode: ExpansionMode,

    /// Hard bound on the number of occurrences added after the anchor.
    pub max_iterations: usize,
}

impl ExpansionOptions {
    /// Preview of at most `cap` occurrences.
    #[must_use]
    pub const fn preview(cap: usize) -> Self {
        Self {
            mode: ExpansionMode::Preview(cap),
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// The complete series.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            mode: ExpansionMode::Full,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Sets the maximum number of steps.
    #[must_use]
    pub const fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    const fn is_preview(self) -> bool {
        matches!(self.mode, ExpansionMode::Preview(_))
    }
}

/// ## Summary
/// Expands a validated series into its occurrence dates.
///
/// The first element is always the series start (except for `Preview(0)`,
/// which returns an empty list), and the dates are strictly increasing.
/// A date equal to an `Until` bound is included.
///
/// In preview mode, running into `max_iterations` or the end of the
/// representable date range simply ends the list.
///
/// ## Errors
///
/// Only in full mode:
/// - `Unbounded` for a series that never ends
/// - `IterationLimitExceeded` if the series needs more than `max_iterations` steps
/// - `DateOutOfRange` if an occurrence cannot be represented
///
/// ## Side Effects
///
/// None - this is a pure function that performs expansion in memory.
pub fn expand(
    series: &Series,
    options: ExpansionOptions,
) -> Result<Vec<NaiveDate>, ExpansionError> {
    let bound = match (options.mode, series.termination()) {
        (ExpansionMode::Full, Termination::Never) => return Err(ExpansionError::Unbounded),
        (ExpansionMode::Full, Termination::Count(count)) => count_to_usize(count),
        (ExpansionMode::Full, Termination::Until(_)) => usize::MAX,
        (ExpansionMode::Preview(cap), Termination::Count(count)) => cap.min(count_to_usize(count)),
        (ExpansionMode::Preview(cap), _) => cap,
    };

    let mut occurrences = Vec::new();
    if bound == 0 {
        return Ok(occurrences);
    }

    let mut current = series.start();
    occurrences.push(current);

    let mut step: usize = 0;
    while occurrences.len() < bound {
        step += 1;

        let Some(next) = next_occurrence(series, current, step) else {
            if options.is_preview() {
                tracing::debug!(last = %current, "Preview reached end of date range");
                break;
            }
            return Err(ExpansionError::DateOutOfRange(current));
        };

        // Stepping past the end date ends the series without counting
        // against the bound
        if let Termination::Until(end) = series.termination()
            && next > end
        {
            break;
        }

        if step > options.max_iterations {
            if options.is_preview() {
                tracing::warn!(
                    max_iterations = options.max_iterations,
                    produced = occurrences.len(),
                    "Preview stopped by iteration limit"
                );
                break;
            }
            return Err(ExpansionError::IterationLimitExceeded(options.max_iterations));
        }

        debug_assert!(next > current, "occurrences must strictly increase");
        tracing::trace!(step, %next, "Accepted occurrence");
        occurrences.push(next);
        current = next;
    }

    tracing::debug!(
        start = %series.start(),
        mode = ?options.mode,
        count = occurrences.len(),
        "Expanded recurrence series"
    );

    Ok(occurrences)
}

fn count_to_usize(count: u32) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}

/// Computes occurrence number `step` (the anchor is step 0) given the
/// previous occurrence `current`.
fn next_occurrence(series: &Series, current: NaiveDate, step: usize) -> Option<NaiveDate> {
    let interval = series.interval();
    match series.frequency() {
        Frequency::Daily => date::add_days(current, u64::from(interval)),
        Frequency::Weekly if series.weekdays().is_empty() => {
            date::add_days(current, 7 * u64::from(interval))
        }
        Frequency::Weekly => date::next_listed_weekday(current, series.weekdays(), interval),
        Frequency::Monthly => {
            let months = months_from_anchor(step, interval, 1)?;
            let day = series.day_of_month().unwrap_or_else(|| series.start().day());
            date::add_months_on_day(series.start(), months, day)
        }
        Frequency::Yearly => {
            let months = months_from_anchor(step, interval, 12)?;
            date::add_months_on_day(series.start(), months, series.start().day())
        }
    }
}

fn months_from_anchor(step: usize, interval: u32, months_per_unit: u32) -> Option<u32> {
    u32::try_from(step)
        .ok()?
        .checked_mul(interval)?
        .checked_mul(months_per_unit)
}
