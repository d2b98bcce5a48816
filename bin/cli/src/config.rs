//! Inspector configuration.
//!
//! Composed from library configs and loaded via the `config` crate from an
//! optional file, overridden by environment variables prefixed with
//! `FLOWSCOPE` (nested keys separated by `__`, e.g.
//! `FLOWSCOPE_LIMITS__MAX_NODES=500`).
//!
//! See [`AnalysisLimits`], [`DurationTable`] and [`RetryPolicyTable`] for the
//! individual sections.

use flowscope_graph::{AnalysisLimits, DurationTable};
use flowscope_outcome::RetryPolicyTable;
use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FLOWSCOPE";

/// Inspector configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InspectorConfig {
    /// Input-size guard for workflow documents.
    #[serde(default)]
    pub limits: AnalysisLimits,

    /// Duration estimates per node type.
    #[serde(default)]
    pub durations: DurationTable,

    /// Retry policies per error category.
    #[serde(default)]
    pub retry: RetryPolicyTable,
}

impl InspectorConfig {
    /// Loads configuration from `path` (if given) and the environment.
    ///
    /// The file format follows its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, or a value has
    /// the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowscope_outcome::{BackoffStrategy, RetryPolicy};
    use std::io::Write;

    fn config_file(extension: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = InspectorConfig::load(None).expect("load");
        assert_eq!(config.limits, AnalysisLimits::default());
        assert_eq!(config.retry, RetryPolicyTable::default());
    }

    #[test]
    fn loads_toml_file() {
        let file = config_file(
            ".toml",
            r#"
[limits]
max_nodes = 25

[durations]
default_ms = 250

[durations.overrides]
slack = 800

[retry.timeout]
strategy = "exponential"
initial_delay_ms = 2000
max_attempts = 4
"#,
        );

        let config = InspectorConfig::load(Some(file.path())).expect("load");
        assert_eq!(config.limits.max_nodes, 25);
        assert_eq!(config.limits.max_connections, 50_000);
        assert_eq!(config.durations.lookup("slack"), 800);
        assert_eq!(config.durations.lookup("unknownType"), 250);
        assert_eq!(config.retry.timeout, RetryPolicy::exponential(2_000, 4));
        assert_eq!(config.retry.rate_limit.strategy, BackoffStrategy::Exponential);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = InspectorConfig::load(Some(Path::new("/nonexistent/flowscope.toml")));
        assert!(result.is_err());
    }
}
