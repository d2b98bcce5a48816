//! Retry policy advice.
//!
//! The advisor maps a classification to a retry recommendation. It keeps no
//! history; counting attempts is the retry orchestrator's job.

use crate::category::ErrorCategory;
use crate::classify::{ErrorAnalysis, classify};
use crate::record::ExecutionErrorRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    None,
    Linear,
    Exponential,
}

/// Retry parameters for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub strategy: BackoffStrategy,
    pub initial_delay_ms: u64,
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Creates an exponential policy.
    #[must_use]
    pub const fn exponential(initial_delay_ms: u64, max_attempts: u32) -> Self {
        Self {
            strategy: BackoffStrategy::Exponential,
            initial_delay_ms,
            max_attempts,
        }
    }

    /// Creates a linear policy.
    #[must_use]
    pub const fn linear(initial_delay_ms: u64, max_attempts: u32) -> Self {
        Self {
            strategy: BackoffStrategy::Linear,
            initial_delay_ms,
            max_attempts,
        }
    }
}

/// Category to retry policy mapping.
///
/// Only consulted for retryable classifications; anything else is never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicyTable {
    #[serde(default = "default_rate_limit")]
    pub rate_limit: RetryPolicy,
    #[serde(default = "default_timeout")]
    pub timeout: RetryPolicy,
    #[serde(default = "default_network")]
    pub network: RetryPolicy,
    #[serde(default = "default_resource")]
    pub resource: RetryPolicy,
    /// Policy for retryable categories without their own entry.
    #[serde(default = "default_fallback")]
    pub fallback: RetryPolicy,
}

fn default_rate_limit() -> RetryPolicy {
    RetryPolicy::exponential(60_000, 5)
}

fn default_timeout() -> RetryPolicy {
    RetryPolicy::linear(10_000, 2)
}

fn default_network() -> RetryPolicy {
    RetryPolicy::exponential(5_000, 3)
}

fn default_resource() -> RetryPolicy {
    RetryPolicy::exponential(5_000, 3)
}

fn default_fallback() -> RetryPolicy {
    RetryPolicy::exponential(5_000, 3)
}

impl Default for RetryPolicyTable {
    fn default() -> Self {
        Self {
            rate_limit: default_rate_limit(),
            timeout: default_timeout(),
            network: default_network(),
            resource: default_resource(),
            fallback: default_fallback(),
        }
    }
}

impl RetryPolicyTable {
    /// Returns the policy used for a retryable category.
    #[must_use]
    pub fn policy_for(&self, category: ErrorCategory) -> &RetryPolicy {
        match category {
            ErrorCategory::RateLimit => &self.rate_limit,
            ErrorCategory::Timeout => &self.timeout,
            ErrorCategory::Network => &self.network,
            ErrorCategory::Resource => &self.resource,
            _ => &self.fallback,
        }
    }

    /// Recommends a retry strategy for a classification.
    #[must_use]
    pub fn suggest(&self, analysis: &ErrorAnalysis) -> RetryStrategy {
        if !analysis.is_retryable {
            return RetryStrategy::none();
        }

        let policy = self.policy_for(analysis.category);
        RetryStrategy {
            should_retry: true,
            strategy: policy.strategy,
            initial_delay_ms: policy.initial_delay_ms,
            max_attempts: policy.max_attempts,
        }
    }
}

/// Retry recommendation for a failed execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryStrategy {
    pub should_retry: bool,
    pub strategy: BackoffStrategy,
    pub initial_delay_ms: u64,
    pub max_attempts: u32,
}

impl RetryStrategy {
    /// The "do not retry" recommendation.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            should_retry: false,
            strategy: BackoffStrategy::None,
            initial_delay_ms: 0,
            max_attempts: 0,
        }
    }

    /// Returns the delay before the given 1-based attempt.
    ///
    /// Returns `None` if retrying is not advised or the attempt is outside
    /// `1..=max_attempts`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if !self.should_retry || attempt == 0 || attempt > self.max_attempts {
            return None;
        }

        let delay_ms = match self.strategy {
            BackoffStrategy::None => return None,
            BackoffStrategy::Linear => self.initial_delay_ms.saturating_mul(u64::from(attempt)),
            BackoffStrategy::Exponential => {
                let factor = 1u64.checked_shl(attempt - 1).unwrap_or(u64::MAX);
                self.initial_delay_ms.saturating_mul(factor)
            }
        };
        Some(Duration::from_millis(delay_ms))
    }
}

/// Recommends a retry strategy using the default policy table.
#[must_use]
pub fn suggest_retry(record: &ExecutionErrorRecord) -> RetryStrategy {
    RetryPolicyTable::default().suggest(&classify(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest_for(message: &str) -> RetryStrategy {
        suggest_retry(&ExecutionErrorRecord::new(message))
    }

    #[test]
    fn authentication_is_never_retried() {
        for message in ["401 Unauthorized", "403 Forbidden", "invalid api key"] {
            assert_eq!(suggest_for(message), RetryStrategy::none(), "{message}");
        }
    }

    #[test]
    fn rate_limit_backs_off_exponentially() {
        let strategy = suggest_for("Rate limit exceeded");
        assert!(strategy.should_retry);
        assert_eq!(strategy.strategy, BackoffStrategy::Exponential);
        assert_eq!(strategy.initial_delay_ms, 60_000);
        assert_eq!(strategy.max_attempts, 5);
    }

    #[test]
    fn timeout_retries_linearly() {
        let strategy = suggest_for("ETIMEDOUT");
        assert_eq!(strategy.strategy, BackoffStrategy::Linear);
        assert_eq!(strategy.initial_delay_ms, 10_000);
        assert_eq!(strategy.max_attempts, 2);
    }

    #[test]
    fn network_and_unavailable_resource() {
        for message in ["ECONNRESET", "502 Bad Gateway"] {
            let strategy = suggest_for(message);
            assert_eq!(strategy.strategy, BackoffStrategy::Exponential, "{message}");
            assert_eq!(strategy.initial_delay_ms, 5_000);
            assert_eq!(strategy.max_attempts, 3);
        }
    }

    #[test]
    fn non_retryable_categories() {
        for message in ["out of memory", "bad request", "misconfigured node", "???"] {
            let strategy = suggest_for(message);
            assert!(!strategy.should_retry, "{message}");
            assert_eq!(strategy.strategy, BackoffStrategy::None);
            assert_eq!(strategy.initial_delay_ms, 0);
            assert_eq!(strategy.max_attempts, 0);
        }
    }

    #[test]
    fn fallback_policy_for_other_retryable_categories() {
        let table = RetryPolicyTable::default();
        let analysis = ErrorAnalysis {
            category: ErrorCategory::Validation,
            severity: crate::Severity::Low,
            is_retryable: true,
            suggestion: String::new(),
            estimated_impact: None,
        };
        let strategy = table.suggest(&analysis);
        assert_eq!(strategy.strategy, BackoffStrategy::Exponential);
        assert_eq!(strategy.initial_delay_ms, 5_000);
        assert_eq!(strategy.max_attempts, 3);
    }

    #[test]
    fn table_is_tunable() {
        let table: RetryPolicyTable = serde_json::from_str(
            r#"{ "rate_limit": { "strategy": "linear", "initial_delay_ms": 1000, "max_attempts": 9 } }"#,
        )
        .expect("deserialize");
        assert_eq!(table.rate_limit, RetryPolicy::linear(1_000, 9));
        assert_eq!(table.timeout, RetryPolicyTable::default().timeout);

        let strategy = table.suggest(&classify(&ExecutionErrorRecord::new("429")));
        assert_eq!(strategy.max_attempts, 9);
    }

    #[test]
    fn exponential_delays_double() {
        let strategy = suggest_for("ECONNREFUSED");
        assert_eq!(strategy.delay_for_attempt(1), Some(Duration::from_secs(5)));
        assert_eq!(strategy.delay_for_attempt(2), Some(Duration::from_secs(10)));
        assert_eq!(strategy.delay_for_attempt(3), Some(Duration::from_secs(20)));
        assert_eq!(strategy.delay_for_attempt(4), None);
        assert_eq!(strategy.delay_for_attempt(0), None);
    }

    #[test]
    fn linear_delays_grow_by_initial() {
        let strategy = suggest_for("deadline exceeded");
        assert_eq!(strategy.delay_for_attempt(1), Some(Duration::from_secs(10)));
        assert_eq!(strategy.delay_for_attempt(2), Some(Duration::from_secs(20)));
        assert_eq!(strategy.delay_for_attempt(3), None);
    }

    #[test]
    fn no_delay_when_not_retrying() {
        assert_eq!(RetryStrategy::none().delay_for_attempt(1), None);
    }

    #[test]
    fn huge_attempts_saturate() {
        let strategy = RetryStrategy {
            should_retry: true,
            strategy: BackoffStrategy::Exponential,
            initial_delay_ms: 1_000,
            max_attempts: u32::MAX,
        };
        assert_eq!(
            strategy.delay_for_attempt(200),
            Some(Duration::from_millis(u64::MAX))
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(suggest_for("429")).expect("serialize");
        assert_eq!(json["shouldRetry"], true);
        assert_eq!(json["strategy"], "exponential");
        assert_eq!(json["initialDelayMs"], 60_000);
    }
}
