//! Recurrence pattern value object, as collected from a recurrence form.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Frequency, Weekday};

/// How a series terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndType {
    Never,
    Date,
    Occurrences,
}

/// Unvalidated recurrence pattern.
///
/// Field types are loose: numbers may be missing, out of range, or sent as
/// strings, and nothing is checked until validation. Values that cannot be
/// read during deserialization become `None` (or an empty weekday list) so the
/// validator reports them against the right field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    #[serde(rename = "type")]
    pub frequency: Frequency,

    /// Every N days/weeks/months/years.
    #[serde(
        default,
        deserialize_with = "lenient_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<i64>,

    /// Sunday-based weekday numbers; only read for weekly patterns.
    #[serde(
        default,
        deserialize_with = "lenient_integer_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_of_week: Option<Vec<i64>>,

    /// Pinned day of month; only read for monthly patterns.
    #[serde(
        default,
        deserialize_with = "lenient_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub day_of_month: Option<i64>,

    pub end_type: EndType,

    /// Last allowed date (inclusive) when `end_type` is `Date`.
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,

    /// Total occurrences, including the first, when `end_type` is `Occurrences`.
    #[serde(
        default,
        deserialize_with = "lenient_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub occurrences: Option<i64>,
}

impl RecurrencePattern {
    /// Creates a never-ending pattern with an interval of 1.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: Some(1),
            days_of_week: None,
            day_of_month: None,
            end_type: EndType::Never,
            end_date: None,
            occurrences: None,
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets the weekday selection, sorted and without duplicates.
    #[must_use]
    pub fn with_days_of_week(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut indices: Vec<i64> = days.into_iter().map(|day| i64::from(day.index())).collect();
        indices.sort_unstable();
        indices.dedup();
        self.days_of_week = Some(indices);
        self
    }

    /// Sets the pinned day of month.
    #[must_use]
    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(i64::from(day));
        self
    }

    /// Terminates the series after `count` occurrences in total.
    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.end_type = EndType::Occurrences;
        self.occurrences = Some(count);
        self.end_date = None; // Mutually exclusive
        self
    }

    /// Terminates the series on or before `date`.
    #[must_use]
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_type = EndType::Date;
        self.end_date = Some(date);
        self.occurrences = None; // Mutually exclusive
        self
    }

    /// Removes any termination.
    #[must_use]
    pub fn never_ending(mut self) -> Self {
        self.end_type = EndType::Never;
        self.end_date = None;
        self.occurrences = None;
        self
    }

    /// Adds `day` to the weekday selection, or removes it if already selected.
    ///
    /// The selection stays sorted. Removing the last weekday leaves an empty
    /// selection, which weekly validation rejects.
    #[must_use]
    pub fn toggle_weekday(mut self, day: Weekday) -> Self {
        let index = i64::from(day.index());
        let mut days = self.days_of_week.take().unwrap_or_default();
        if days.contains(&index) {
            days.retain(|&d| d != index);
        } else {
            days.push(index);
            days.sort_unstable();
        }
        self.days_of_week = Some(days);
        self
    }
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(integer_value))
}

/// Reads a list of integers. A list that cannot be read becomes an empty
/// selection, so validation still reports it against its own field.
fn lenient_integer_list<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(integer_value)
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default(),
        _ => Vec::new(),
    }))
}

fn integer_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(text) => parse_date(&text),
        _ => None,
    }))
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    text.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| text.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}
