use thiserror::Error;

/// Failures surfaced at the input boundary or by the estimator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("unknown vaccine: {0}")]
    UnknownVaccine(String),
    #[error("amount out of range while calculating earnings")]
    AmountOutOfRange,
}

impl EstimateError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn negative(field: impl Into<String>) -> Self {
        Self::invalid(field, "must not be negative")
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::invalid(field, "is required")
    }
}

pub type EstimateResult<T> = Result<T, EstimateError>;
