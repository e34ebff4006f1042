//! Recurrence operations for the event editor: validation, preview, full
//! materialization, summaries and RRULE export.

use cadence_core::config::{ExpansionConfig, Settings};
use cadence_core::error::CoreError;
use cadence_rule::rule::core::{RecurrencePattern, Series};
use cadence_rule::rule::expand::{ExpansionOptions, expand};
use cadence_rule::rule::validate_and_expand;
use cadence_rule::rule::validation::validate;
use chrono::NaiveDate;
use rrule::{RRule, RRuleSet, Tz, Unvalidated};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

/// First occurrences of a series, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Up to `preview_cap` occurrences, starting with the anchor.
    pub occurrences: Vec<NaiveDate>,
    /// Whether the series continues past the listed occurrences.
    pub has_more: bool,
}

/// Stateless recurrence operations bounded by the configured limits.
#[derive(Debug, Clone)]
pub struct RecurrenceService {
    config: ExpansionConfig,
}

impl RecurrenceService {
    /// ## Summary
    /// Creates a service with the given expansion limits.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if the limits are invalid.
    pub fn new(config: ExpansionConfig) -> ServiceResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// ## Summary
    /// Creates a service from loaded settings.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if the expansion limits are invalid.
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        Self::new(settings.expansion.clone())
    }

    #[must_use]
    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// ## Summary
    /// Validates a pattern for a series starting on `start`.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` naming the offending field.
    #[tracing::instrument(skip(self, pattern), fields(frequency = %pattern.frequency))]
    #[expect(clippy::unused_self)]
    pub fn validate(&self, pattern: &RecurrencePattern, start: NaiveDate) -> ServiceResult<Series> {
        Ok(validate(pattern, start)?)
    }

    /// ## Summary
    /// Lists the first `preview_cap` occurrences and whether more follow.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the pattern is invalid.
    #[tracing::instrument(skip(self, pattern), fields(frequency = %pattern.frequency))]
    pub fn preview(&self, pattern: &RecurrencePattern, start: NaiveDate) -> ServiceResult<Preview> {
        let series = validate(pattern, start)?;

        let cap = self.config.preview_cap;
        // One extra occurrence tells whether the series continues
        let options = ExpansionOptions::preview(cap.saturating_add(1))
            .with_max_iterations(self.config.max_iterations);
        let mut occurrences = expand(&series, options)?;

        let has_more = occurrences.len() > cap;
        occurrences.truncate(cap);

        tracing::debug!(count = occurrences.len(), has_more, "Built recurrence preview");
        Ok(Preview {
            occurrences,
            has_more,
        })
    }

    /// ## Summary
    /// Materializes every occurrence of a terminating series.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the pattern is invalid, or
    /// `ServiceError::ExpansionError` if the series never ends or exceeds the
    /// iteration limit.
    #[tracing::instrument(skip(self, pattern), fields(frequency = %pattern.frequency))]
    pub fn occurrences(
        &self,
        pattern: &RecurrencePattern,
        start: NaiveDate,
    ) -> ServiceResult<Vec<NaiveDate>> {
        let options = ExpansionOptions::full().with_max_iterations(self.config.max_iterations);

        match validate_and_expand(pattern, start, options) {
            Ok(dates) => {
                tracing::debug!(count = dates.len(), "Materialized recurrence series");
                Ok(dates)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                if matches!(err, ServiceError::ExpansionError(_)) {
                    tracing::error!(error = %err, "Full expansion failed");
                }
                Err(err)
            }
        }
    }

    /// ## Summary
    /// One-line English summary such as `Every 2 weeks on Tue, Thu, 6 times`.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the pattern is invalid.
    #[expect(clippy::unused_self)]
    pub fn describe(&self, pattern: &RecurrencePattern, start: NaiveDate) -> ServiceResult<String> {
        Ok(validate(pattern, start)?.to_string())
    }

    /// ## Summary
    /// Builds an `RRuleSet` for the series, anchored at midnight UTC on `start`.
    ///
    /// Returns `Ok(None)` if the series has no exact RRULE equivalent.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the pattern is invalid, or
    /// `ServiceError::RRuleError` if the `rrule` crate rejects the rule.
    #[tracing::instrument(skip(self, pattern), fields(frequency = %pattern.frequency))]
    #[expect(clippy::unused_self)]
    pub fn rrule_set(
        &self,
        pattern: &RecurrencePattern,
        start: NaiveDate,
    ) -> ServiceResult<Option<RRuleSet>> {
        let series = validate(pattern, start)?;

        let Some(rule) = series.to_rrule() else {
            tracing::debug!(%series, "Series has no exact RRULE equivalent");
            return Ok(None);
        };
        let rrule_text = rule.to_string();
        tracing::trace!(rrule = %rrule_text, "Built RRULE");

        let midnight = start
            .and_hms_opt(0, 0, 0)
            .ok_or(CoreError::InvariantViolation("midnight is a valid time"))?;
        let dt_start = midnight.and_utc().with_timezone(&Tz::UTC);

        let rrule = rrule_text
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| ServiceError::RRuleError(err.to_string()))?;
        let rrule_set = rrule
            .build(dt_start)
            .map_err(|err| ServiceError::RRuleError(err.to_string()))?;

        Ok(Some(rrule_set))
    }
}
