//! Execution error records.
//!
//! A record is whatever the execution engine reported for a failed run,
//! assembled by the caller. All fields are treated as opaque text.

use crate::error::RecordError;
use flowscope_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The failure record of a workflow execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionErrorRecord {
    /// Primary error message.
    pub message: String,
    /// Longer description, if the engine provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stack trace of the failing node.
    #[serde(default, alias = "stack", skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Engine-specific details (node name, HTTP status, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, JsonValue>>,
}

/// One record or a batch of them, as read from input.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Many(Vec<ExecutionErrorRecord>),
    One(ExecutionErrorRecord),
}

impl ExecutionErrorRecord {
    /// Creates a record with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the stack trace.
    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Adds a context entry.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Parses a single record or an array of records from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, or a record lacks a
    /// `message`.
    pub fn parse_many(text: &str) -> Result<Vec<Self>, RecordError> {
        let input: RecordInput =
            serde_json::from_str(text).map_err(|e| RecordError::Malformed {
                details: e.to_string(),
            })?;
        Ok(match input {
            RecordInput::Many(records) => records,
            RecordInput::One(record) => vec![record],
        })
    }

    /// Returns the lowercase text the classifier searches.
    ///
    /// Present fields are joined with single spaces in the order message,
    /// description, stack trace, serialized context.
    #[must_use]
    pub fn search_text(&self) -> String {
        let context = self
            .context
            .as_ref()
            .map(|context| serde_json::to_string(context).unwrap_or_default());

        let mut parts = vec![self.message.as_str()];
        parts.extend(self.description.as_deref());
        parts.extend(self.stack_trace.as_deref());
        parts.extend(context.as_deref());
        parts.join(" ").to_lowercase()
    }
}
