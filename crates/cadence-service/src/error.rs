use cadence_core::error::CoreError;
use cadence_rule::error::RuleError;
use cadence_rule::rule::expand::ExpansionError;
use cadence_rule::rule::validation::ValidationError;
use thiserror::Error;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Expansion error: {0}")]
    ExpansionError(#[from] ExpansionError),

    #[error("RRule error: {0}")]
    RRuleError(String),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl From<RuleError> for ServiceError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Validation(err) => Self::ValidationError(err),
            RuleError::Expansion(err) => Self::ExpansionError(err),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
