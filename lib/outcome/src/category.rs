//! Classification vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of failure an execution error represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Network,
    Authentication,
    Timeout,
    Validation,
    RateLimit,
    Configuration,
    Resource,
    Unknown,
}

impl ErrorCategory {
    /// Returns the wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Authentication => "AUTHENTICATION",
            Self::Timeout => "TIMEOUT",
            Self::Validation => "VALIDATION",
            Self::RateLimit => "RATE_LIMIT",
            Self::Configuration => "CONFIGURATION",
            Self::Resource => "RESOURCE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently an error needs attention. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Returns the wire name of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected effect of the failure beyond the failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wire_names() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(
            serde_json::to_string(&ErrorCategory::RateLimit).expect("serialize"),
            r#""RATE_LIMIT""#
        );
        let parsed: ErrorCategory = serde_json::from_str(r#""CONFIGURATION""#).expect("parse");
        assert_eq!(parsed, ErrorCategory::Configuration);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn impact_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Impact::Critical).expect("serialize"),
            r#""critical""#
        );
    }
}
