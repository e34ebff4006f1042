pub mod error;
pub mod rule;
