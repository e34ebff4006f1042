//! Validation of recurrence patterns before expansion.

pub mod pattern;

pub use pattern::{ValidationError, validate};
