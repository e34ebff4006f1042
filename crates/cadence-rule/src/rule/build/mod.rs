//! Serialization of validated series to interchange formats.

pub mod rrule;

pub use rrule::RRule;
