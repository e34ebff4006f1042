//! ## Summary
//! Consistency checks for a recurrence pattern against its start date.
//!
//! Checks run in a fixed order and the first failure is reported, so a form
//! shows one error at a time, next to the field that caused it.

use cadence_core::constants::{MAX_OCCURRENCES, MIN_OCCURRENCES};
use chrono::NaiveDate;

use crate::rule::core::{EndType, Frequency, RecurrencePattern, Series, Termination, Weekday};

/// Reason a recurrence pattern was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Interval missing, zero, negative, or not a whole number.
    #[error("Interval must be a whole number of at least 1")]
    InvalidInterval,

    /// Weekly pattern with an explicitly empty weekday selection.
    #[error("Select at least one day of the week")]
    MissingWeekdays,

    /// Weekday number outside `0..=6`.
    #[error("Day of week {0} is outside 0..=6")]
    InvalidWeekday(i64),

    /// Day of month outside `1..=31`.
    #[error("Day of month {0} is outside 1..=31")]
    InvalidDayOfMonth(i64),

    /// Occurrence count missing or out of range.
    #[error(
        "Number of occurrences must be between {min} and {max}",
        min = MIN_OCCURRENCES,
        max = MAX_OCCURRENCES
    )]
    InvalidOccurrenceCount,

    /// End date missing, unparseable, or not after the start date.
    #[error("End date must be after the start date")]
    InvalidEndDate,
}

impl ValidationError {
    /// Name of the pattern field the error belongs to, as it appears in the
    /// serialized pattern.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidInterval => "interval",
            Self::MissingWeekdays | Self::InvalidWeekday(_) => "daysOfWeek",
            Self::InvalidDayOfMonth(_) => "dayOfMonth",
            Self::InvalidOccurrenceCount => "occurrences",
            Self::InvalidEndDate => "endDate",
        }
    }
}

/// ## Summary
/// Validates `pattern` for a series starting on `start`.
///
/// On success returns the typed [`Series`] the expander works from. Weekdays
/// are only read for weekly patterns and the pinned day only for monthly ones;
/// other frequencies ignore them.
///
/// ## Errors
/// Returns the first [`ValidationError`] found, checking the interval, the
/// weekday selection, the pinned day, the occurrence count and the end date
/// in that order.
///
/// ## Side Effects
/// None.
pub fn validate(pattern: &RecurrencePattern, start: NaiveDate) -> Result<Series, ValidationError> {
    let result = check(pattern, start);
    match &result {
        Ok(series) => tracing::trace!(%start, %series, "Recurrence pattern accepted"),
        Err(err) => tracing::debug!(
            %start,
            field = err.field(),
            error = %err,
            "Recurrence pattern rejected"
        ),
    }
    result
}

fn check(pattern: &RecurrencePattern, start: NaiveDate) -> Result<Series, ValidationError> {
    let interval = pattern
        .interval
        .filter(|&interval| interval >= 1)
        .and_then(|interval| u32::try_from(interval).ok())
        .ok_or(ValidationError::InvalidInterval)?;

    let weekdays = match (pattern.frequency, &pattern.days_of_week) {
        (Frequency::Weekly, Some(days)) => weekdays(days)?,
        _ => Vec::new(),
    };

    let day_of_month = match (pattern.frequency, pattern.day_of_month) {
        (Frequency::Monthly, Some(day)) => Some(
            u32::try_from(day)
                .ok()
                .filter(|day| (1..=31).contains(day))
                .ok_or(ValidationError::InvalidDayOfMonth(day))?,
        ),
        _ => None,
    };

    let termination = match pattern.end_type {
        EndType::Never => Termination::Never,
        EndType::Occurrences => pattern
            .occurrences
            .filter(|count| (MIN_OCCURRENCES..=MAX_OCCURRENCES).contains(count))
            .and_then(|count| u32::try_from(count).ok())
            .map(Termination::Count)
            .ok_or(ValidationError::InvalidOccurrenceCount)?,
        EndType::Date => pattern
            .end_date
            .filter(|&end| end > start)
            .map(Termination::Until)
            .ok_or(ValidationError::InvalidEndDate)?,
    };

    Ok(Series::new(
        start,
        pattern.frequency,
        interval,
        weekdays,
        day_of_month,
        termination,
    ))
}

fn weekdays(days: &[i64]) -> Result<Vec<Weekday>, ValidationError> {
    if days.is_empty() {
        return Err(ValidationError::MissingWeekdays);
    }

    let mut weekdays = days
        .iter()
        .map(|&day| {
            u8::try_from(day)
                .ok()
                .and_then(Weekday::from_index)
                .ok_or(ValidationError::InvalidWeekday(day))
        })
        .collect::<Result<Vec<_>, _>>()?;
    weekdays.sort_unstable();
    weekdays.dedup();
    Ok(weekdays)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn start() -> NaiveDate {
        date(2024, 1, 2)
    }

    #[test]
    fn accepts_simple_daily_pattern() {
        let series = validate(&RecurrencePattern::daily().with_count(5), start())
            .expect("pattern should be valid");

        assert_eq!(series.start(), start());
        assert_eq!(series.interval(), 1);
        assert_eq!(series.termination(), Termination::Count(5));
    }

    #[test]
    fn rejects_missing_zero_and_negative_interval() {
        for interval in [None, Some(0), Some(-3), Some(i64::from(u32::MAX) + 1)] {
            let mut pattern = RecurrencePattern::daily();
            pattern.interval = interval;
            assert_eq!(
                validate(&pattern, start()),
                Err(ValidationError::InvalidInterval),
                "interval {interval:?}"
            );
        }
    }

    #[test_log::test]
    fn rejects_empty_weekday_selection() {
        let mut pattern = RecurrencePattern::weekly();
        pattern.days_of_week = Some(Vec::new());

        let err = validate(&pattern, start()).expect_err("empty selection is invalid");
        assert_eq!(err, ValidationError::MissingWeekdays);
        assert_eq!(err.field(), "daysOfWeek");
    }

    #[test]
    fn absent_weekday_selection_is_plain_weekly() {
        let series = validate(&RecurrencePattern::weekly(), start()).expect("valid");
        assert!(series.weekdays().is_empty());
    }

    #[test]
    fn rejects_out_of_range_weekday() {
        let mut pattern = RecurrencePattern::weekly();
        pattern.days_of_week = Some(vec![1, 7]);

        assert_eq!(
            validate(&pattern, start()),
            Err(ValidationError::InvalidWeekday(7))
        );
    }

    #[test]
    fn loose_day_fields_reach_their_own_errors() {
        let weekly: RecurrencePattern = serde_json::from_str(
            r#"{"type": "weekly", "interval": 1, "daysOfWeek": [-1], "endType": "never"}"#,
        )
        .expect("valid payload");
        let err = validate(&weekly, start()).expect_err("negative weekday is invalid");
        assert_eq!(err, ValidationError::InvalidWeekday(-1));
        assert_eq!(err.field(), "daysOfWeek");

        let monthly: RecurrencePattern = serde_json::from_str(
            r#"{"type": "monthly", "interval": 1, "dayOfMonth": 300, "endType": "never"}"#,
        )
        .expect("valid payload");
        let err = validate(&monthly, start()).expect_err("day 300 is invalid");
        assert_eq!(err, ValidationError::InvalidDayOfMonth(300));
        assert_eq!(err.field(), "dayOfMonth");

        let unreadable: RecurrencePattern = serde_json::from_str(
            r#"{"type": "weekly", "interval": 1, "daysOfWeek": ["x"], "endType": "never"}"#,
        )
        .expect("valid payload");
        let err = validate(&unreadable, start()).expect_err("unreadable selection is invalid");
        assert_eq!(err.field(), "daysOfWeek");
    }

    #[test]
    fn weekdays_are_sorted_and_deduplicated() {
        let mut pattern = RecurrencePattern::weekly();
        pattern.days_of_week = Some(vec![4, 2, 4]);

        let series = validate(&pattern, start()).expect("valid");
        assert_eq!(series.weekdays(), &[Weekday::Tuesday, Weekday::Thursday]);
    }

    #[test]
    fn weekdays_ignored_for_non_weekly_patterns() {
        let mut pattern = RecurrencePattern::daily();
        pattern.days_of_week = Some(Vec::new());

        let series = validate(&pattern, start()).expect("daily ignores weekdays");
        assert!(series.weekdays().is_empty());
    }

    #[test]
    fn rejects_out_of_range_day_of_month() {
        for day in [0, 32] {
            let pattern = RecurrencePattern::monthly().with_day_of_month(day);
            assert_eq!(
                validate(&pattern, start()),
                Err(ValidationError::InvalidDayOfMonth(i64::from(day)))
            );
        }
    }

    #[test]
    fn day_of_month_ignored_for_non_monthly_patterns() {
        let pattern = RecurrencePattern::yearly().with_day_of_month(40);
        let series = validate(&pattern, start()).expect("yearly ignores day of month");
        assert_eq!(series.day_of_month(), None);
    }

    #[test]
    fn rejects_single_occurrence() {
        let pattern = RecurrencePattern::daily().with_count(1);

        let err = validate(&pattern, start()).expect_err("one occurrence is not recurring");
        assert_eq!(err, ValidationError::InvalidOccurrenceCount);
        assert_eq!(err.field(), "occurrences");
    }

    #[test]
    fn rejects_missing_and_excessive_occurrence_counts() {
        let mut pattern = RecurrencePattern::daily().with_count(2);
        pattern.occurrences = None;
        assert_eq!(
            validate(&pattern, start()),
            Err(ValidationError::InvalidOccurrenceCount)
        );

        let pattern = RecurrencePattern::daily().with_count(MAX_OCCURRENCES + 1);
        assert_eq!(
            validate(&pattern, start()),
            Err(ValidationError::InvalidOccurrenceCount)
        );
    }

    #[test]
    fn rejects_end_date_before_or_on_start() {
        for end in [date(2023, 12, 31), start()] {
            let pattern = RecurrencePattern::daily().with_end_date(end);
            assert_eq!(
                validate(&pattern, start()),
                Err(ValidationError::InvalidEndDate),
                "end date {end}"
            );
        }
    }

    #[test]
    fn rejects_missing_end_date() {
        let mut pattern = RecurrencePattern::daily().with_end_date(date(2024, 2, 1));
        pattern.end_date = None;

        assert_eq!(
            validate(&pattern, start()),
            Err(ValidationError::InvalidEndDate)
        );
    }

    #[test]
    fn accepts_end_date_after_start() {
        let pattern = RecurrencePattern::daily().with_end_date(date(2024, 1, 3));
        let series = validate(&pattern, start()).expect("valid");
        assert_eq!(series.termination(), Termination::Until(date(2024, 1, 3)));
    }

    #[test]
    fn first_failure_wins() {
        let mut pattern = RecurrencePattern::weekly().with_count(1);
        pattern.interval = Some(0);
        pattern.days_of_week = Some(Vec::new());

        assert_eq!(
            validate(&pattern, start()),
            Err(ValidationError::InvalidInterval)
        );

        pattern.interval = Some(1);
        assert_eq!(
            validate(&pattern, start()),
            Err(ValidationError::MissingWeekdays)
        );
    }

    #[test]
    fn unused_termination_fields_are_ignored() {
        let mut pattern = RecurrencePattern::daily();
        pattern.occurrences = Some(1);
        pattern.end_date = Some(date(2000, 1, 1));

        let series = validate(&pattern, start()).expect("never-ending ignores both");
        assert_eq!(series.termination(), Termination::Never);
    }
}
