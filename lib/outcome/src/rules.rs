//! Ordered category rules.
//!
//! Rules are evaluated top to bottom against the lowercase search text and
//! the first match wins. Order is part of the contract: configuration
//! wording must be checked before the generic "invalid" validation rule,
//! and one category may appear more than once with different outcomes.

use crate::category::{ErrorCategory, Impact, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEntry {
    /// Pattern matched against the lowercase search text.
    pub pattern: &'static str,
    /// Category reported on a match.
    pub category: ErrorCategory,
    /// Severity reported on a match.
    pub severity: Severity,
    /// Whether a retry can succeed.
    pub retryable: bool,
    /// Estimated impact, when the rule implies one.
    pub impact: Option<Impact>,
    /// Advice shown to the user.
    pub suggestion: &'static str,
}

/// The rule table in priority order.
pub const RULE_TABLE: &[RuleEntry] = &[
    RuleEntry {
        pattern: r"econnrefused|econnreset|enotfound|ehostunreach|enetunreach|eai_again|connection (?:refused|reset)|socket hang up|network (?:error|is unreachable|unreachable)|host unreachable|getaddrinfo|dns lookup failed",
        category: ErrorCategory::Network,
        severity: Severity::High,
        retryable: true,
        impact: None,
        suggestion: "Check that the target service is reachable and its address is correct",
    },
    RuleEntry {
        pattern: r"\b401\b|unauthori[sz]ed|unauthenticated|authentication (?:failed|required)|invalid (?:api key|token|credentials)",
        category: ErrorCategory::Authentication,
        severity: Severity::Critical,
        retryable: false,
        impact: Some(Impact::Critical),
        suggestion: "Verify the credentials used by the workflow and renew expired tokens",
    },
    RuleEntry {
        pattern: r"\b403\b|forbidden|permission denied|access denied|insufficient permissions",
        category: ErrorCategory::Authentication,
        severity: Severity::High,
        retryable: false,
        impact: None,
        suggestion: "Grant the workflow's credentials access to the requested resource",
    },
    RuleEntry {
        pattern: r"timed out|\btime ?outs?\b|etimedout|esockettimedout|deadline exceeded",
        category: ErrorCategory::Timeout,
        severity: Severity::Medium,
        retryable: true,
        impact: None,
        suggestion: "Increase the node timeout or reduce the amount of work per request",
    },
    RuleEntry {
        pattern: r"configuration|misconfigur|not configured",
        category: ErrorCategory::Configuration,
        severity: Severity::High,
        retryable: false,
        impact: None,
        suggestion: "Review the node configuration and environment settings",
    },
    RuleEntry {
        pattern: r"\b400\b|bad request|invalid|required field|is required|missing required|validation (?:failed|error)",
        category: ErrorCategory::Validation,
        severity: Severity::Medium,
        retryable: false,
        impact: None,
        suggestion: "Check the input data and required fields of the failing node",
    },
    RuleEntry {
        pattern: r"\b429\b|rate.?limit|too many requests|quota exceeded|throttl",
        category: ErrorCategory::RateLimit,
        severity: Severity::Medium,
        retryable: true,
        impact: None,
        suggestion: "Wait before retrying or lower the request rate of the workflow",
    },
    RuleEntry {
        pattern: r"out of memory|heap|enomem|enospc|disk full|no space left",
        category: ErrorCategory::Resource,
        severity: Severity::Critical,
        retryable: false,
        impact: Some(Impact::Critical),
        suggestion: "Free memory or disk space on the execution host before running again",
    },
    RuleEntry {
        pattern: r"\b50[23]\b|service unavailable|bad gateway|temporarily unavailable",
        category: ErrorCategory::Resource,
        severity: Severity::High,
        retryable: true,
        impact: None,
        suggestion: "The upstream service is unavailable; retry after it recovers",
    },
];

/// Outcome used when no rule matches.
pub const FALLBACK: RuleEntry = RuleEntry {
    pattern: "",
    category: ErrorCategory::Unknown,
    severity: Severity::Medium,
    retryable: false,
    impact: None,
    suggestion: "Review the execution logs for details",
};

/// A compiled rule.
#[derive(Debug)]
pub struct CategoryRule {
    pub entry: &'static RuleEntry,
    regex: Regex,
}

impl CategoryRule {
    /// Returns true if the rule matches the search text.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

static RULES: LazyLock<Vec<CategoryRule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|entry| CategoryRule {
            entry,
            regex: Regex::new(entry.pattern).expect("rule patterns are valid regexes"),
        })
        .collect()
});

/// Returns the compiled rules in priority order.
pub fn rules() -> &'static [CategoryRule] {
    &RULES
}

/// Returns the first rule matching the search text, or [`FALLBACK`].
#[must_use]
pub fn first_match(text: &str) -> &'static RuleEntry {
    rules()
        .iter()
        .find(|rule| rule.matches(text))
        .map_or(&FALLBACK, |rule| rule.entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(rules().len(), RULE_TABLE.len());
    }

    #[test]
    fn empty_text_falls_through() {
        assert_eq!(first_match("").category, ErrorCategory::Unknown);
    }

    #[test]
    fn status_codes_match_on_word_boundaries() {
        assert_eq!(first_match("status 401").category, ErrorCategory::Authentication);
        assert_eq!(first_match("order 4010 failed").category, ErrorCategory::Unknown);
        assert_eq!(first_match("got 503").category, ErrorCategory::Resource);
        assert_eq!(first_match("id 15030").category, ErrorCategory::Unknown);
    }

    #[test]
    fn resource_branches_on_sub_pattern() {
        let oom = first_match("javascript heap out of memory");
        let unavailable = first_match("service unavailable");
        assert_eq!(oom.category, ErrorCategory::Resource);
        assert_eq!(unavailable.category, ErrorCategory::Resource);
        assert!(!oom.retryable);
        assert!(unavailable.retryable);
        assert_eq!(oom.impact, Some(Impact::Critical));
    }

    #[test]
    fn authentication_splits_on_status() {
        let unauthorized = first_match("401 unauthorized");
        let forbidden = first_match("403 forbidden");
        assert_eq!(unauthorized.severity, Severity::Critical);
        assert_eq!(forbidden.severity, Severity::High);
        assert_eq!(forbidden.impact, None);
    }
}
