//! Structural validation of workflow documents.
//!
//! Validation never fails; every problem becomes a [`ValidationIssue`]. The
//! dashboard gates execution on [`ValidationResult::valid`] and shows the
//! messages to the user.

use crate::definition::WorkflowDocument;
use crate::graph::WorkflowGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single structural problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The document has no nodes.
    Empty,
    /// More than one node uses the same id.
    DuplicateNode { node_id: String },
    /// A connection map key names no node.
    UnknownSource { node_id: String },
    /// An edge targets no node; `source` is the first node referencing it.
    UnknownTarget { node_id: String, source: String },
    /// Nodes not connected to the first node, in document order.
    Disconnected { node_ids: Vec<String> },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "workflow must have at least one node"),
            Self::DuplicateNode { node_id } => write!(f, "duplicate node id '{node_id}'"),
            Self::UnknownSource { node_id } => {
                write!(f, "connection source '{node_id}' does not match any node")
            }
            Self::UnknownTarget { node_id, source } => {
                write!(
                    f,
                    "connection target '{node_id}' (from '{source}') does not match any node"
                )
            }
            Self::Disconnected { node_ids } => {
                write!(f, "disconnected nodes: {}", node_ids.join(", "))
            }
        }
    }
}

/// Outcome of validating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub valid: bool,
    /// Messages in rule order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Builds a result from typed issues.
    #[must_use]
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        Self {
            valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Validates a document.
#[must_use]
pub fn validate(document: &WorkflowDocument) -> ValidationResult {
    let issues = validation_issues(document);
    let result = ValidationResult::from_issues(&issues);
    tracing::debug!(
        valid = result.valid,
        errors = result.errors.len(),
        "Validated workflow"
    );
    result
}

/// Collects every structural issue of a document.
///
/// Rules run in order: empty document (which stops further checks),
/// duplicate ids, unresolved references, then connectivity.
#[must_use]
pub fn validation_issues(document: &WorkflowDocument) -> Vec<ValidationIssue> {
    if document.nodes.is_empty() {
        return vec![ValidationIssue::Empty];
    }

    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for node in &document.nodes {
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            issues.push(ValidationIssue::DuplicateNode {
                node_id: node.id.clone(),
            });
        }
    }

    for source in document.connections.keys() {
        if !seen.contains(source.as_str()) {
            issues.push(ValidationIssue::UnknownSource {
                node_id: source.clone(),
            });
        }
    }

    let mut missing_targets = HashSet::new();
    for edge in document.edges() {
        let target = edge.target.node.as_str();
        if !seen.contains(target) && missing_targets.insert(target) {
            issues.push(ValidationIssue::UnknownTarget {
                node_id: target.to_string(),
                source: edge.source.to_string(),
            });
        }
    }

    if document.node_count() > 1 {
        let graph = WorkflowGraph::from_document(document);
        let unreachable = graph.unreachable_from(&document.nodes[0].id);
        if !unreachable.is_empty() {
            issues.push(ValidationIssue::Disconnected {
                node_ids: unreachable.into_iter().map(str::to_string).collect(),
            });
        }
    }

    issues
}
