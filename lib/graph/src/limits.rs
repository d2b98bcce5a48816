//! Input-size guard applied before analysis.

use crate::definition::WorkflowDocument;
use crate::error::GraphError;
use flowscope_core::Result;
use serde::{Deserialize, Serialize};

/// Size limits for accepted workflow documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLimits {
    /// Maximum number of nodes.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    /// Maximum number of edges across all slots.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_max_nodes() -> usize {
    10_000
}

fn default_max_connections() -> usize {
    50_000
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_nodes: default_max_nodes(),
            max_connections: default_max_connections(),
        }
    }
}

impl AnalysisLimits {
    /// Checks a document against the limits.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TooManyNodes`] or
    /// [`GraphError::TooManyConnections`] when a limit is exceeded.
    pub fn check(&self, document: &WorkflowDocument) -> Result<(), GraphError> {
        let nodes = document.node_count();
        if nodes > self.max_nodes {
            tracing::warn!(nodes, limit = self.max_nodes, "Rejected oversized workflow");
            return Err(GraphError::TooManyNodes {
                count: nodes,
                limit: self.max_nodes,
            }
            .into());
        }

        let connections = document.connection_count();
        if connections > self.max_connections {
            tracing::warn!(
                connections,
                limit = self.max_connections,
                "Rejected oversized workflow"
            );
            return Err(GraphError::TooManyConnections {
                count: connections,
                limit: self.max_connections,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeDefinition;

    fn chain(len: usize) -> WorkflowDocument {
        let mut doc = WorkflowDocument::new();
        for i in 0..len {
            doc = doc.with_node(NodeDefinition::new(format!("n{i}"), "base.set"));
        }
        for i in 1..len {
            doc = doc.connect(&format!("n{}", i - 1), 0, &format!("n{i}"));
        }
        doc
    }

    #[test]
    fn limits_have_correct_defaults() {
        let limits = AnalysisLimits::default();
        assert_eq!(limits.max_nodes, 10_000);
        assert_eq!(limits.max_connections, 50_000);
    }

    #[test]
    fn accepts_document_within_limits() {
        let limits = AnalysisLimits {
            max_nodes: 3,
            max_connections: 2,
        };
        assert!(limits.check(&chain(3)).is_ok());
    }

    #[test]
    fn rejects_too_many_nodes() {
        let limits = AnalysisLimits {
            max_nodes: 2,
            max_connections: 100,
        };
        let err = limits.check(&chain(3)).unwrap_err();
        assert!(err.to_string().contains("3 nodes, limit is 2"));
    }

    #[test]
    fn rejects_too_many_connections() {
        let limits = AnalysisLimits {
            max_nodes: 100,
            max_connections: 1,
        };
        let err = limits.check(&chain(3)).unwrap_err();
        assert!(err.to_string().contains("2 connections, limit is 1"));
    }
}
