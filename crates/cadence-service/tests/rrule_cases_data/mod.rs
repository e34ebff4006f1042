use cadence_core::config::ExpansionConfig;
use cadence_rule::rule::core::RecurrencePattern;
use chrono::NaiveDate;

use crate::recurrence::RecurrenceService;

pub struct RecurrenceCase {
    pub name: &'static str,
    pub pattern: &'static str,
    pub start: &'static str,
    pub expected: Option<&'static [&'static str]>,
}

pub fn recurrence_cases() -> Vec<RecurrenceCase> {
    vec![
        RecurrenceCase {
            name: "daily_interval_across_month",
            pattern: r#"{"type":"daily","interval":3,"endType":"occurrences","occurrences":5}"#,
            start: "2024-01-30",
            expected: Some(&[
                "2024-01-30",
                "2024-02-02",
                "2024-02-05",
                "2024-02-08",
                "2024-02-11",
            ]),
        },
        RecurrenceCase {
            name: "weekly_every_other_tue_thu",
            pattern: r#"{"type":"weekly","interval":2,"daysOfWeek":[2,4],"endType":"occurrences","occurrences":6}"#,
            start: "2024-01-02",
            expected: Some(&[
                "2024-01-02",
                "2024-01-04",
                "2024-01-16",
                "2024-01-18",
                "2024-01-30",
                "2024-02-01",
            ]),
        },
        RecurrenceCase {
            name: "weekly_mon_wed_fri_until",
            pattern: r#"{"type":"weekly","interval":1,"daysOfWeek":[1,3,5],"endType":"date","endDate":"2024-01-19"}"#,
            start: "2024-01-01",
            expected: Some(&[
                "2024-01-01",
                "2024-01-03",
                "2024-01-05",
                "2024-01-08",
                "2024-01-10",
                "2024-01-12",
                "2024-01-15",
                "2024-01-17",
                "2024-01-19",
            ]),
        },
        RecurrenceCase {
            name: "weekly_without_weekdays_across_year",
            pattern: r#"{"type":"weekly","interval":3,"endType":"occurrences","occurrences":4}"#,
            start: "2024-12-20",
            expected: Some(&["2024-12-20", "2025-01-10", "2025-01-31", "2025-02-21"]),
        },
        RecurrenceCase {
            name: "weekly_weekend_block",
            pattern: r#"{"type":"weekly","interval":2,"daysOfWeek":[0,6],"endType":"occurrences","occurrences":6}"#,
            start: "2024-01-07",
            expected: Some(&[
                "2024-01-07",
                "2024-01-13",
                "2024-01-21",
                "2024-01-27",
                "2024-02-04",
                "2024-02-10",
            ]),
        },
        RecurrenceCase {
            name: "monthly_pinned_day_across_year",
            pattern: r#"{"type":"monthly","interval":1,"dayOfMonth":15,"endType":"occurrences","occurrences":4}"#,
            start: "2024-11-15",
            expected: Some(&["2024-11-15", "2024-12-15", "2025-01-15", "2025-02-15"]),
        },
        RecurrenceCase {
            name: "monthly_every_other_until",
            pattern: r#"{"type":"monthly","interval":2,"endType":"date","endDate":"2024-09-01"}"#,
            start: "2024-01-28",
            expected: Some(&["2024-01-28", "2024-03-28", "2024-05-28", "2024-07-28"]),
        },
        RecurrenceCase {
            name: "yearly_count",
            pattern: r#"{"type":"yearly","interval":1,"endType":"occurrences","occurrences":3}"#,
            start: "2023-03-10",
            expected: Some(&["2023-03-10", "2024-03-10", "2025-03-10"]),
        },
    ]
}

fn parse_day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Invalid date {value}: {err}"))
}

/// Expands the case with the service and with the `rrule` crate, and checks
/// both against each other and against the expected dates.
pub fn assert_case(case: &RecurrenceCase) {
    let pattern: RecurrencePattern = serde_json::from_str(case.pattern)
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));
    let start = parse_day(case.start);

    let service = RecurrenceService::new(ExpansionConfig::default())
        .unwrap_or_else(|err| panic!("Failed to create service: {err}"));

    let actual = service
        .occurrences(&pattern, start)
        .unwrap_or_else(|err| panic!("Failed to expand {}: {}", case.name, err));

    let rrule_set = service
        .rrule_set(&pattern, start)
        .unwrap_or_else(|err| panic!("Failed to build RRULE for {}: {}", case.name, err))
        .unwrap_or_else(|| panic!("Case {} has no RRULE equivalent", case.name));
    let limit = u16::try_from(actual.len() + 10).unwrap_or(u16::MAX);
    let from_rrule: Vec<NaiveDate> = rrule_set
        .all(limit)
        .dates
        .iter()
        .map(chrono::DateTime::date_naive)
        .collect();

    assert_eq!(
        actual, from_rrule,
        "Case {} disagrees with the rrule crate",
        case.name
    );

    if let Some(expected) = case.expected {
        let expected: Vec<NaiveDate> = expected.iter().map(|value| parse_day(value)).collect();
        assert_eq!(actual, expected, "Case {} did not match", case.name);
    }
}
