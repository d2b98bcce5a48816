//! Resolved workflow graph using petgraph.
//!
//! The graph is a view over a [`WorkflowDocument`]:
//! - Nodes are the document's node definitions; on duplicate ids the first
//!   definition wins
//! - Edges are the document's connections whose source and target both
//!   resolve to a node
//!
//! Dangling connections are dropped from the view. They still count towards
//! document-level metrics and are reported by validation.

use crate::definition::WorkflowDocument;
use crate::edge::EdgeRef;
use crate::error::GraphError;
use crate::node::NodeDefinition;
use flowscope_core::Result;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef as _;
use std::collections::{HashMap, VecDeque};

/// Traversal state of a node during depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnStack,
    Done,
}

/// A workflow graph borrowing its document.
#[derive(Debug, Clone)]
pub struct WorkflowGraph<'a> {
    /// The underlying directed graph.
    graph: DiGraph<&'a NodeDefinition, EdgeRef<'a>>,
    /// Map from node id to petgraph's NodeIndex for O(1) lookup.
    node_index_map: HashMap<&'a str, NodeIndex>,
}

impl<'a> WorkflowGraph<'a> {
    /// Builds the resolved graph of a document.
    #[must_use]
    pub fn from_document(document: &'a WorkflowDocument) -> Self {
        let mut graph = DiGraph::with_capacity(document.node_count(), 0);
        let mut node_index_map = HashMap::with_capacity(document.node_count());

        for node in &document.nodes {
            if node_index_map.contains_key(node.id.as_str()) {
                continue;
            }
            let index = graph.add_node(node);
            node_index_map.insert(node.id.as_str(), index);
        }

        for edge in document.edges() {
            let (Some(&source), Some(&target)) = (
                node_index_map.get(edge.source),
                node_index_map.get(edge.target.node.as_str()),
            ) else {
                continue;
            };
            graph.add_edge(source, target, edge);
        }

        Self {
            graph,
            node_index_map,
        }
    }

    /// Returns a node by its id.
    #[must_use]
    pub fn get_node(&self, node_id: &str) -> Option<&'a NodeDefinition> {
        let index = self.node_index_map.get(node_id)?;
        self.graph.node_weight(*index).copied()
    }

    /// Returns true if the id resolves to a node.
    #[must_use]
    pub fn contains(&self, node_id: &str) -> bool {
        self.node_index_map.contains_key(node_id)
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of resolved edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns nodes that have no resolved incoming edges.
    pub fn entry_nodes(&self) -> Vec<&'a NodeDefinition> {
        self.nodes_without(Direction::Incoming)
    }

    /// Returns nodes that have no resolved outgoing edges.
    pub fn terminal_nodes(&self) -> Vec<&'a NodeDefinition> {
        self.nodes_without(Direction::Outgoing)
    }

    fn nodes_without(&self, direction: Direction) -> Vec<&'a NodeDefinition> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.edges_directed(idx, direction).next().is_none())
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// Returns the downstream nodes of a node, in connection order.
    pub fn successors(&self, node_id: &str) -> Vec<&'a NodeDefinition> {
        let Some(&index) = self.node_index_map.get(node_id) else {
            return Vec::new();
        };
        self.ordered_targets(index)
            .into_iter()
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// Returns the upstream nodes of a node, in connection order.
    pub fn predecessors(&self, node_id: &str) -> Vec<&'a NodeDefinition> {
        let Some(&index) = self.node_index_map.get(node_id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .map(|edge| (edge.id(), edge.source()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges
            .into_iter()
            .map(|(_, idx)| self.graph[idx])
            .collect()
    }

    /// Outgoing targets in insertion order. petgraph iterates newest first.
    fn ordered_targets(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges(index)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Counts back edges found by depth-first search from each seed.
    ///
    /// Seeds are visited in the given order and skipped once reached by an
    /// earlier search. Each edge is examined once, so every edge into a node
    /// on the current search path counts exactly once. The search keeps its
    /// own stack and terminates on any input.
    #[must_use]
    pub fn count_back_edges<'s>(&self, seeds: impl IntoIterator<Item = &'s str>) -> usize {
        let mut state = vec![Visit::Unseen; self.graph.node_count()];
        let mut back_edges = 0;

        for seed in seeds {
            let Some(&root) = self.node_index_map.get(seed) else {
                continue;
            };
            if state[root.index()] != Visit::Unseen {
                continue;
            }

            state[root.index()] = Visit::OnStack;
            let mut stack = vec![(root, self.ordered_targets(root), 0usize)];

            while let Some((node, targets, cursor)) = stack.last_mut() {
                let Some(&next) = targets.get(*cursor) else {
                    state[node.index()] = Visit::Done;
                    stack.pop();
                    continue;
                };
                *cursor += 1;

                match state[next.index()] {
                    Visit::OnStack => back_edges += 1,
                    Visit::Done => {}
                    Visit::Unseen => {
                        state[next.index()] = Visit::OnStack;
                        let next_targets = self.ordered_targets(next);
                        stack.push((next, next_targets, 0));
                    }
                }
            }
        }

        back_edges
    }

    /// Returns the ids of nodes not reachable from `root` when edges are
    /// followed in both directions, in graph order.
    ///
    /// An unknown root reaches nothing.
    #[must_use]
    pub fn unreachable_from(&self, root: &str) -> Vec<&'a str> {
        let mut reached = vec![false; self.graph.node_count()];

        if let Some(&start) = self.node_index_map.get(root) {
            let mut queue = VecDeque::from([start]);
            reached[start.index()] = true;

            while let Some(node) = queue.pop_front() {
                for neighbor in self.graph.neighbors_undirected(node) {
                    if !reached[neighbor.index()] {
                        reached[neighbor.index()] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        self.graph
            .node_indices()
            .filter(|idx| !reached[idx.index()])
            .map(|idx| self.graph[idx].id.as_str())
            .collect()
    }

    /// Returns node ids in an order where every node follows its upstream
    /// nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CycleDetected`] if the graph has a cycle.
    pub fn execution_order(&self) -> Result<Vec<&'a str>, GraphError> {
        let order = petgraph::algo::toposort(&self.graph, None).map_err(|cycle| {
            GraphError::CycleDetected {
                node_id: self.graph[cycle.node_id()].id.clone(),
            }
        })?;

        Ok(order
            .into_iter()
            .map(|idx| self.graph[idx].id.as_str())
            .collect())
    }
}
