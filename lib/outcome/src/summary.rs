//! Aggregates over batches of execution errors.

use crate::category::{ErrorCategory, Severity};
use crate::classify::classify;
use crate::record::ExecutionErrorRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts of classified errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSummary {
    pub total: usize,
    pub by_category: BTreeMap<ErrorCategory, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    /// Errors whose classification allows a retry.
    pub retryable: usize,
    /// Errors that would alert.
    pub alerts: usize,
}

impl ErrorSummary {
    /// Classifies and counts each record.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ExecutionErrorRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            let analysis = classify(record);
            summary.total += 1;
            *summary.by_category.entry(analysis.category).or_insert(0) += 1;
            *summary.by_severity.entry(analysis.severity).or_insert(0) += 1;
            if analysis.is_retryable {
                summary.retryable += 1;
            }
            if analysis.should_alert() {
                summary.alerts += 1;
            }
        }
        summary
    }

    /// Returns the most frequent category, preferring the earlier category
    /// on ties.
    #[must_use]
    pub fn dominant_category(&self) -> Option<ErrorCategory> {
        self.by_category
            .iter()
            .fold(None, |best: Option<(ErrorCategory, usize)>, (&category, &count)| {
                match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((category, count)),
                }
            })
            .map(|(category, _)| category)
    }
}
