//! A derived number that is either present or absent for a known reason.
//!
//! Engines never raise past their boundary. Whatever goes wrong while deriving
//! a value (a line item that is not in the statement, a zero denominator, too
//! few bars) is folded into [`Reading::Absent`] and serialized as `"N/A"`.

use serde::{Serialize, Serializer};

use crate::error::AnalysisError;

/// Sentinel text used wherever a value could not be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// Why a value is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Absence {
    MissingField,
    InvalidArithmetic,
    InsufficientHistory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T = f64> {
    Value(T),
    Absent(Absence),
}

impl<T> Reading<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Absent(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Value(_))
    }

    pub fn absence(&self) -> Option<Absence> {
        match self {
            Reading::Value(_) => None,
            Reading::Absent(reason) => Some(*reason),
        }
    }
}

impl<T: Copy> Reading<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T> From<Result<T, AnalysisError>> for Reading<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(v) => Reading::Value(v),
            Err(e) => Reading::Absent(e.absence()),
        }
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => v.serialize(serializer),
            Reading::Absent(_) => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reading::Value(v) => v.fmt(f),
            Reading::Absent(_) => f.write_str(NOT_AVAILABLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_number_or_sentinel() {
        let present: Reading = Reading::Value(1.5);
        let absent: Reading = Reading::Absent(Absence::MissingField);
        assert_eq!(serde_json::to_string(&present).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&absent).unwrap(), "\"N/A\"");
    }

    #[test]
    fn test_from_result_keeps_reason() {
        let r: Reading = Err(AnalysisError::history(14, 3)).into();
        assert_eq!(r.absence(), Some(Absence::InsufficientHistory));
        assert_eq!(r.to_string(), "N/A");

        let r: Reading<i64> = Ok(10).into();
        assert_eq!(r.get(), Some(10));
    }
}
