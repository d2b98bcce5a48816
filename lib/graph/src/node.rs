//! Workflow node definitions.
//!
//! Nodes are the units of work in a workflow document. Each node has:
//! - An id, unique within the document
//! - A dotted, vendor-qualified type name (e.g. `n8n-nodes-base.httpRequest`)
//! - Free-form parameters owned by the external engine

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A single node of a workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// The node id. Connections reference nodes by this value.
    pub id: String,
    /// Human-readable label shown in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fully-qualified type string.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub type_name: String,
    /// Engine-specific parameters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Map<String, JsonValue>,
}

impl NodeDefinition {
    /// Creates a node with no parameters.
    #[must_use]
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            type_name: type_name.into(),
            parameters: Map::new(),
        }
    }

    /// Sets a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Returns the trailing segment of the type string.
    ///
    /// `vendor.httpRequest` yields `httpRequest`. Trailing dots are skipped;
    /// a type with no non-empty segment yields the empty string.
    #[must_use]
    pub fn short_type(&self) -> &str {
        short_type_name(&self.type_name)
    }

    /// Returns the positive `amount` parameter of a wait node, if present.
    #[must_use]
    pub fn wait_amount(&self) -> Option<f64> {
        self.parameters
            .get("amount")
            .and_then(JsonValue::as_f64)
            .filter(|amount| *amount > 0.0)
    }
}

/// Extracts the trailing non-empty segment of a dotted type name.
#[must_use]
pub fn short_type_name(type_name: &str) -> &str {
    type_name
        .rsplit('.')
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_type_takes_last_segment() {
        assert_eq!(short_type_name("n8n-nodes-base.httpRequest"), "httpRequest");
        assert_eq!(short_type_name("start"), "start");
        assert_eq!(short_type_name("a.b.c"), "c");
    }

    #[test]
    fn short_type_skips_empty_segments() {
        assert_eq!(short_type_name("vendor.webhook."), "webhook");
        assert_eq!(short_type_name(""), "");
        assert_eq!(short_type_name("..."), "");
    }

    #[test]
    fn wait_amount_requires_positive_number() {
        let wait = NodeDefinition::new("w", "base.wait").with_parameter("amount", 3);
        assert_eq!(wait.wait_amount(), Some(3.0));

        let zero = NodeDefinition::new("w", "base.wait").with_parameter("amount", 0);
        assert_eq!(zero.wait_amount(), None);

        let text = NodeDefinition::new("w", "base.wait").with_parameter("amount", "5");
        assert_eq!(text.wait_amount(), None);
    }

    #[test]
    fn node_deserializes_engine_shape() {
        let node: NodeDefinition = serde_json::from_value(json!({
            "id": "http",
            "name": "Fetch",
            "type": "n8n-nodes-base.httpRequest",
            "typeVersion": 4,
            "position": [200, 300],
            "parameters": { "url": "https://example.com" }
        }))
        .expect("deserialize");

        assert_eq!(node.id, "http");
        assert_eq!(node.short_type(), "httpRequest");
        assert_eq!(node.parameters["url"], "https://example.com");
    }

    #[test]
    fn node_tolerates_null_fields() {
        let node: NodeDefinition =
            serde_json::from_value(json!({ "id": "n", "type": null, "parameters": null }))
                .expect("deserialize");
        assert_eq!(node.type_name, "");
        assert!(node.parameters.is_empty());
    }
}
