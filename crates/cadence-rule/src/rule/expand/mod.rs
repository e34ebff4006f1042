//! Occurrence expansion for recurrence series.
//!
//! Turns a validated [`Series`](crate::rule::core::Series) into concrete
//! calendar dates.

pub mod date;
mod expander;

pub use expander::{ExpansionError, ExpansionMode, ExpansionOptions, expand};
