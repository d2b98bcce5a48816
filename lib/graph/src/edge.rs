//! Connection types for workflow documents.
//!
//! The engine stores connections per source node, per output slot name, as
//! an ordered list of slots. Each slot fans out to zero or more targets:
//!
//! ```json
//! { "if": { "main": [[{ "node": "a", "type": "main", "index": 0 }], [{ "node": "b", "type": "main", "index": 0 }]] } }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Output slot name to the ordered slots of that output.
pub type SlotMap = BTreeMap<String, Vec<OutputSlot>>;

/// One end of a connection: the node and input it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    /// Id of the target node.
    pub node: String,
    /// Connection type, `main` for ordinary data flow.
    #[serde(rename = "type", default = "default_connection_type")]
    pub connection_type: String,
    /// Input index on the target node.
    #[serde(default)]
    pub index: u32,
}

impl ConnectionTarget {
    /// Creates a `main` connection into input 0 of `node`.
    #[must_use]
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            connection_type: default_connection_type(),
            index: 0,
        }
    }
}

fn default_connection_type() -> String {
    "main".to_string()
}

/// The edges leaving a single output slot.
///
/// A `null` slot, which the engine writes for unused outputs, reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputSlot(pub Vec<ConnectionTarget>);

impl OutputSlot {
    /// Returns the targets of this slot.
    #[must_use]
    pub fn targets(&self) -> &[ConnectionTarget] {
        &self.0
    }

    /// Returns the number of edges leaving this slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the slot has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for OutputSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let targets = Option::<Vec<ConnectionTarget>>::deserialize(deserializer)?;
        Ok(Self(targets.unwrap_or_default()))
    }
}

/// A flattened edge with its source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef<'a> {
    /// Id of the source node (the connection map key).
    pub source: &'a str,
    /// Name of the output on the source node.
    pub output: &'a str,
    /// Position of the slot within that output.
    pub slot: usize,
    /// The target of the edge.
    pub target: &'a ConnectionTarget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn target_defaults() {
        let target: ConnectionTarget =
            serde_json::from_value(json!({ "node": "next" })).expect("deserialize");
        assert_eq!(target, ConnectionTarget::new("next"));
        assert_eq!(target.connection_type, "main");
        assert_eq!(target.index, 0);
    }

    #[test]
    fn null_slot_is_empty() {
        let slots: Vec<OutputSlot> =
            serde_json::from_value(json!([null, [{ "node": "b", "type": "main", "index": 1 }]]))
                .expect("deserialize");
        assert_eq!(slots.len(), 2);
        assert!(slots[0].is_empty());
        assert_eq!(slots[1].targets()[0].node, "b");
        assert_eq!(slots[1].targets()[0].index, 1);
    }
}
