//! Recurrence preview and materialization for calendar events.

pub mod service;

pub use service::{Preview, RecurrenceService};
