//! Structural metrics of a workflow document.

use crate::definition::WorkflowDocument;
use crate::duration::DurationTable;
use crate::graph::WorkflowGraph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Weight of each node in the complexity score.
pub const NODE_WEIGHT: f64 = 1.0;
/// Weight of each edge in the complexity score.
pub const CONNECTION_WEIGHT: f64 = 0.5;
/// Penalty per extra edge leaving a single output slot.
pub const BRANCH_PENALTY: f64 = 2.0;
/// Penalty per back edge found while walking from the start nodes.
pub const LOOP_PENALTY: f64 = 3.0;

/// Metrics derived from a workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Number of node entries.
    pub node_count: usize,
    /// Total edges across every output slot.
    pub connection_count: usize,
    /// Short type name to number of nodes of that type.
    pub node_type_counts: BTreeMap<String, usize>,
    /// Nodes that no edge targets, in document order.
    pub start_node_ids: Vec<String>,
    /// Nodes with no connection entry, in document order.
    pub end_node_ids: Vec<String>,
    /// Relative ranking score; higher means more complex.
    pub complexity_score: f64,
    /// Sum of per-node duration estimates.
    pub estimated_duration_ms: u64,
}

/// Analyzes a document using the built-in duration table.
#[must_use]
pub fn analyze(document: &WorkflowDocument) -> AnalysisResult {
    analyze_with(document, &DurationTable::default())
}

/// Analyzes a document with a custom duration table.
#[must_use]
pub fn analyze_with(document: &WorkflowDocument, durations: &DurationTable) -> AnalysisResult {
    let node_count = document.node_count();
    let connection_count = document.connection_count();

    let mut node_type_counts = BTreeMap::new();
    for node in &document.nodes {
        *node_type_counts
            .entry(node.short_type().to_string())
            .or_insert(0) += 1;
    }

    let targets: HashSet<&str> = document
        .edges()
        .map(|edge| edge.target.node.as_str())
        .collect();
    let start_node_ids: Vec<String> = document
        .nodes
        .iter()
        .filter(|node| !targets.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect();
    let end_node_ids: Vec<String> = document
        .nodes
        .iter()
        .filter(|node| !document.connections.contains_key(&node.id))
        .map(|node| node.id.clone())
        .collect();

    let branch_penalty: f64 = document
        .slots()
        .filter(|(_, slot)| slot.len() > 1)
        .map(|(_, slot)| (slot.len() - 1) as f64 * BRANCH_PENALTY)
        .sum();

    let graph = WorkflowGraph::from_document(document);
    let back_edges = graph.count_back_edges(start_node_ids.iter().map(String::as_str));
    let loop_penalty = back_edges as f64 * LOOP_PENALTY;

    let complexity_score = node_count as f64 * NODE_WEIGHT
        + connection_count as f64 * CONNECTION_WEIGHT
        + branch_penalty
        + loop_penalty;

    let estimated_duration_ms = document
        .nodes
        .iter()
        .map(|node| durations.estimate(node))
        .fold(0u64, u64::saturating_add);

    tracing::debug!(
        nodes = node_count,
        connections = connection_count,
        back_edges,
        complexity = complexity_score,
        duration_ms = estimated_duration_ms,
        "Analyzed workflow"
    );

    AnalysisResult {
        node_count,
        connection_count,
        node_type_counts,
        start_node_ids,
        end_node_ids,
        complexity_score,
        estimated_duration_ms,
    }
}
