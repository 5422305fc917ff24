//! Error types for the inference engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("Invalid fuzzy set: {reason}")]
    InvalidFuzzySet { reason: String },
    #[error("Variable '{variable}' has no term '{term}'")]
    UnknownTerm { variable: String, term: String },
    #[error("Variable key does not belong to this variable set")]
    UnknownVariable,
    #[error("No crisp input was given for variable '{variable}'")]
    MissingInput { variable: String },
    #[error("Rule {rule} must conclude with a single `is` proposition")]
    InvalidConsequent { rule: usize },
    #[error("No actionable recommendation for '{variable}': aggregated membership is zero everywhere")]
    DegenerateAggregation { variable: String },
    #[error("Sampling step must be at least {min}, got {step}")]
    InvalidSampleStep { step: f64, min: f64 },
    #[error("{quantity} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        quantity: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl FuzzyError {
    pub(crate) fn invalid_set(reason: impl Into<String>) -> Self {
        Self::InvalidFuzzySet {
            reason: reason.into(),
        }
    }
}

/// Result type for fuzzy operations.
pub type FuzzyResult<T> = Result<T, FuzzyError>;
