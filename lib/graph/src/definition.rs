//! Workflow document types.
//!
//! A workflow document is the engine's definition format, accepted as-is:
//! - A list of nodes in editor order
//! - A connection map from source node id to its output slots
//!
//! Parsing only checks the shape. Dangling references and disconnected nodes
//! are left for [`validate`](crate::validate) to report.

use crate::edge::{ConnectionTarget, EdgeRef, OutputSlot, SlotMap};
use crate::error::DocumentError;
use crate::node::{NodeDefinition, null_as_default};
use flowscope_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Name of the output used by [`WorkflowDocument::connect`].
pub const MAIN_OUTPUT: &str = "main";

/// A complete workflow definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    /// Workflow name, if the document carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nodes in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<NodeDefinition>,
    /// Source node id to output slots, kept in sorted key order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub connections: BTreeMap<String, SlotMap>,
}

impl WorkflowDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or does not have the
    /// document shape.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text).map_err(|e| DocumentError::Malformed {
            details: e.to_string(),
        })?)
    }

    /// Converts an already-parsed JSON value into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the document shape.
    pub fn from_value(value: JsonValue) -> Result<Self, DocumentError> {
        Ok(
            serde_json::from_value(value).map_err(|e| DocumentError::Malformed {
                details: e.to_string(),
            })?,
        )
    }

    /// Appends a node.
    #[must_use]
    pub fn with_node(mut self, node: NodeDefinition) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds a `main` edge from slot `slot` of `source` to `target`.
    ///
    /// Missing slots up to `slot` are created empty.
    #[must_use]
    pub fn connect(mut self, source: &str, slot: usize, target: &str) -> Self {
        let slots = self
            .connections
            .entry(source.to_string())
            .or_default()
            .entry(MAIN_OUTPUT.to_string())
            .or_default();
        if slots.len() <= slot {
            slots.resize_with(slot + 1, OutputSlot::default);
        }
        slots[slot].0.push(ConnectionTarget::new(target));
        self
    }

    /// Returns every edge, ordered by source id, output name, slot, then
    /// position within the slot.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.connections.iter().flat_map(|(source, outputs)| {
            outputs.iter().flat_map(move |(output, slots)| {
                slots.iter().enumerate().flat_map(move |(slot, targets)| {
                    targets.targets().iter().map(move |target| EdgeRef {
                        source: source.as_str(),
                        output: output.as_str(),
                        slot,
                        target,
                    })
                })
            })
        })
    }

    /// Returns every output slot with its source id.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &OutputSlot)> {
        self.connections.iter().flat_map(|(source, outputs)| {
            outputs
                .values()
                .flatten()
                .map(move |slot| (source.as_str(), slot))
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of edges across all slots.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.slots().map(|(_, slot)| slot.len()).sum()
    }

    /// Returns the first node with the given id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeDefinition> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
