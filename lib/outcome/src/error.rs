//! Error types for the outcome crate.
//!
//! Classification itself never fails. The only error is reading error
//! records whose shape does not match.

use std::fmt;

/// Errors from reading execution error records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The input is not valid JSON or is not a record or list of records.
    Malformed { details: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { details } => {
                write!(f, "malformed execution error record: {details}")
            }
        }
    }
}

impl std::error::Error for RecordError {}
