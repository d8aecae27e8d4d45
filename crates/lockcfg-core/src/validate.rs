// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Input validation for edit sessions. Failures are returned as data so the
//! caller can show them inline and keep the session open.

use crate::params::Range;
use std::fmt;

/// Why user input was rejected. `Display` yields the user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Nothing was entered.
    Required,
    /// Input is not a number.
    NotANumber,
    /// Number lies outside the permitted range.
    OutOfRange {
        /// Permitted range.
        range: Range,
    },
    /// Choice is not one of the permitted values.
    NotPermitted,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("value required"),
            Self::NotANumber => f.write_str("invalid number"),
            Self::OutOfRange { range } => write!(f, "value out of range {range}"),
            Self::NotPermitted => f.write_str("value not permitted"),
        }
    }
}

/// Check numeric input against an inclusive range.
pub fn validate(input: &str, range: Range) -> Option<ValidationError> {
    if input.is_empty() {
        return Some(ValidationError::Required);
    }
    let value = match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Some(ValidationError::NotANumber),
    };
    if range.contains(value) {
        None
    } else {
        Some(ValidationError::OutOfRange { range })
    }
}

/// Check a choice against the permitted values of an enumerated parameter.
pub fn validate_choice(input: &str, values: &[String]) -> Option<ValidationError> {
    if input.is_empty() {
        Some(ValidationError::Required)
    } else if values.iter().any(|v| v == input) {
        None
    } else {
        Some(ValidationError::NotPermitted)
    }
}
