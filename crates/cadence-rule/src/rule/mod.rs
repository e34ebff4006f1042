//! Recurrence patterns: validation, expansion and RRULE rendering.

pub mod build;
pub mod core;
pub mod expand;
pub mod validation;

use chrono::NaiveDate;

use crate::error::RuleResult;
use self::core::RecurrencePattern;
use self::expand::ExpansionOptions;

/// ## Summary
/// Validates `pattern` against `start` and expands it in one call.
///
/// ## Errors
/// Returns `RuleError::Validation` if the pattern is rejected, or
/// `RuleError::Expansion` if expansion fails under `options`.
pub fn validate_and_expand(
    pattern: &RecurrencePattern,
    start: NaiveDate,
    options: ExpansionOptions,
) -> RuleResult<Vec<NaiveDate>> {
    let series = validation::validate(pattern, start)?;
    Ok(expand::expand(&series, options)?)
}
