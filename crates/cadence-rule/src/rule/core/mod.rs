//! Recurrence value types.

mod frequency;
mod pattern;
mod series;
mod weekday;

pub use frequency::Frequency;
pub use pattern::{EndType, RecurrencePattern};
pub use series::{Series, Termination};
pub use weekday::Weekday;
