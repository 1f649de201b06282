use thiserror::Error;

use crate::reading::Absence;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Invalid arithmetic: {0}")]
    InvalidArithmetic(String),

    #[error("Insufficient history: need {required}, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn missing(field: impl Into<String>) -> Self {
        AnalysisError::MissingField { field: field.into() }
    }

    pub fn arithmetic(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidArithmetic(msg.into())
    }

    pub fn history(required: usize, available: usize) -> Self {
        AnalysisError::InsufficientHistory { required, available }
    }

    /// The absence kind this error degrades to inside an engine.
    ///
    /// Edge errors (bad snapshot data, bad config) never reach an engine, but
    /// if one does it is reported as invalid arithmetic rather than dropped.
    pub fn absence(&self) -> Absence {
        match self {
            AnalysisError::MissingField { .. } => Absence::MissingField,
            AnalysisError::InsufficientHistory { .. } => Absence::InsufficientHistory,
            AnalysisError::InvalidArithmetic(_)
            | AnalysisError::InvalidData(_)
            | AnalysisError::Config(_) => Absence::InvalidArithmetic,
        }
    }
}

/// Divide two operands, rejecting a zero or non-finite operand instead of
/// producing infinity or NaN.
pub fn checked_div(numerator: f64, denominator: f64, what: &str) -> Result<f64, AnalysisError> {
    if !numerator.is_finite() || !denominator.is_finite() {
        return Err(AnalysisError::arithmetic(format!("{what}: non-finite operand")));
    }
    if denominator == 0.0 {
        return Err(AnalysisError::arithmetic(format!("{what}: zero denominator")));
    }
    let value = numerator / denominator;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::arithmetic(format!("{what}: result overflowed")))
    }
}
