use thiserror::Error;

use crate::rule::expand::ExpansionError;
use crate::rule::validation::ValidationError;

/// Recurrence rule errors
#[derive(Error, Debug)]
pub enum RuleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
