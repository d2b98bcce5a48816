//! Per-type execution duration estimates.
//!
//! Estimates are coarse constants used to rank workflows in listings, not
//! measurements. Operators can override individual entries through
//! configuration; lookups ignore ASCII case because configuration keys are
//! not case-preserving.

use crate::node::NodeDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type name whose duration comes from its `amount` parameter.
pub const WAIT_TYPE: &str = "wait";

/// Built-in estimates in milliseconds, keyed by short type name.
pub const BUILTIN_DURATIONS_MS: &[(&str, u64)] = &[
    ("start", 10),
    ("manualTrigger", 10),
    ("scheduleTrigger", 10),
    ("webhook", 10),
    ("noOp", 10),
    ("httpRequest", 2000),
    ("function", 100),
    ("functionItem", 100),
    ("code", 200),
    ("set", 50),
    ("if", 50),
    ("switch", 50),
    ("merge", 50),
];

/// Estimate for types with no entry.
pub const DEFAULT_DURATION_MS: u64 = 500;

/// Lookup table for node duration estimates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTable {
    /// Estimate for unknown or missing types.
    #[serde(default = "default_duration_ms")]
    pub default_ms: u64,
    /// Entries that take precedence over the built-in table.
    #[serde(default)]
    pub overrides: BTreeMap<String, u64>,
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            default_ms: default_duration_ms(),
            overrides: BTreeMap::new(),
        }
    }
}

impl DurationTable {
    /// Overrides the estimate for one type.
    #[must_use]
    pub fn with_override(mut self, type_name: impl Into<String>, duration_ms: u64) -> Self {
        self.overrides.insert(type_name.into(), duration_ms);
        self
    }

    /// Returns the estimate for a short type name.
    ///
    /// The empty type name falls into the default bucket.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> u64 {
        if type_name.is_empty() {
            return self.default_ms;
        }

        self.overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
            .map(|(_, ms)| *ms)
            .or_else(|| {
                BUILTIN_DURATIONS_MS
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
                    .map(|(_, ms)| *ms)
            })
            .unwrap_or(self.default_ms)
    }

    /// Returns the estimate for a node.
    ///
    /// Wait nodes with a positive numeric `amount` take `amount` seconds,
    /// regardless of the table.
    #[must_use]
    pub fn estimate(&self, node: &NodeDefinition) -> u64 {
        let type_name = node.short_type();
        let wait_ms = type_name
            .eq_ignore_ascii_case(WAIT_TYPE)
            .then(|| node.wait_amount())
            .flatten()
            .map(|amount| (amount * 1000.0).round() as u64);
        wait_ms.unwrap_or_else(|| self.lookup(type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_entries() {
        let table = DurationTable::default();
        assert_eq!(table.lookup("start"), 10);
        assert_eq!(table.lookup("httpRequest"), 2000);
        assert_eq!(table.lookup("webhook"), 10);
        assert_eq!(table.lookup("code"), 200);
        assert_eq!(table.lookup("switch"), 50);
    }

    #[test]
    fn unknown_and_empty_types_use_default() {
        let table = DurationTable::default();
        assert_eq!(table.lookup("slack"), DEFAULT_DURATION_MS);
        assert_eq!(table.lookup(""), DEFAULT_DURATION_MS);
    }

    #[test]
    fn lookup_ignores_case() {
        let table = DurationTable::default().with_override("httprequest", 1500);
        assert_eq!(table.lookup("httpRequest"), 1500);
        assert_eq!(table.lookup("HTTPREQUEST"), 1500);
        assert_eq!(table.lookup("FUNCTIONITEM"), 100);
    }

    #[test]
    fn wait_uses_amount_in_seconds() {
        let table = DurationTable::default();
        let wait = NodeDefinition::new("w", "base.wait").with_parameter("amount", 2.5);
        assert_eq!(table.estimate(&wait), 2500);
    }

    #[test]
    fn wait_without_amount_falls_back() {
        let table = DurationTable::default();
        let wait = NodeDefinition::new("w", "base.wait");
        assert_eq!(table.estimate(&wait), DEFAULT_DURATION_MS);

        let negative = NodeDefinition::new("w", "base.wait").with_parameter("amount", -4);
        assert_eq!(table.estimate(&negative), DEFAULT_DURATION_MS);
    }

    #[test]
    fn amount_ignored_on_other_types() {
        let table = DurationTable::default();
        let set = NodeDefinition::new("s", "base.set").with_parameter("amount", 10);
        assert_eq!(table.estimate(&set), 50);
    }

    #[test]
    fn deserializes_partial_config() {
        let table: DurationTable =
            serde_json::from_str(r#"{ "overrides": { "slack": 750 } }"#).expect("deserialize");
        assert_eq!(table.default_ms, DEFAULT_DURATION_MS);
        assert_eq!(table.lookup("slack"), 750);
    }
}
