//! Execution error classification.

use crate::category::{ErrorCategory, Impact, Severity};
use crate::record::ExecutionErrorRecord;
use crate::rules::{self, RuleEntry};
use serde::{Deserialize, Serialize};

/// Classification of an execution error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnalysis {
    pub category: ErrorCategory,
    pub severity: Severity,
    /// Whether resubmitting the workflow may succeed.
    pub is_retryable: bool,
    /// Advice shown to the user.
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_impact: Option<Impact>,
}

impl ErrorAnalysis {
    /// Returns true if the error should page or notify someone.
    ///
    /// Critical severity, any authentication failure, or critical impact
    /// all alert.
    #[must_use]
    pub fn should_alert(&self) -> bool {
        self.severity == Severity::Critical
            || self.category == ErrorCategory::Authentication
            || self.estimated_impact == Some(Impact::Critical)
    }
}

impl From<&RuleEntry> for ErrorAnalysis {
    fn from(entry: &RuleEntry) -> Self {
        Self {
            category: entry.category,
            severity: entry.severity,
            is_retryable: entry.retryable,
            suggestion: entry.suggestion.to_string(),
            estimated_impact: entry.impact,
        }
    }
}

/// Classifies an execution error by the first matching rule.
#[must_use]
pub fn classify(record: &ExecutionErrorRecord) -> ErrorAnalysis {
    let analysis = ErrorAnalysis::from(rules::first_match(&record.search_text()));
    tracing::debug!(
        category = %analysis.category,
        severity = %analysis.severity,
        retryable = analysis.is_retryable,
        "Classified execution error"
    );
    analysis
}

/// Returns true if the classified error should alert.
#[must_use]
pub fn should_alert(record: &ExecutionErrorRecord) -> bool {
    classify(record).should_alert()
}
