//! Error types for the graph crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `DocumentError`: The input could not be read as a workflow document
//! - `GraphError`: Boundary checks and graph operations on a parsed document
//!
//! Structural problems inside a well-formed document (dangling references,
//! disconnected nodes) are not errors; they are reported by
//! [`validate`](crate::validate) as display strings.

use std::fmt;

/// Errors from reading a workflow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The input is not valid JSON or does not match the document shape.
    Malformed { details: String },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { details } => {
                write!(f, "malformed workflow document: {details}")
            }
        }
    }
}

impl std::error::Error for DocumentError {}

/// Errors from graph operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The document has more nodes than the configured limit.
    TooManyNodes { count: usize, limit: usize },
    /// The document has more edges than the configured limit.
    TooManyConnections { count: usize, limit: usize },
    /// The graph contains a cycle; `node_id` is a node on it.
    CycleDetected { node_id: String },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyNodes { count, limit } => {
                write!(f, "workflow has {count} nodes, limit is {limit}")
            }
            Self::TooManyConnections { count, limit } => {
                write!(f, "workflow has {count} connections, limit is {limit}")
            }
            Self::CycleDetected { node_id } => {
                write!(f, "graph contains a cycle through node '{node_id}'")
            }
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_error_display() {
        let err = DocumentError::Malformed {
            details: "expected `nodes`".to_string(),
        };
        assert!(err.to_string().contains("malformed workflow document"));
        assert!(err.to_string().contains("expected `nodes`"));
    }

    #[test]
    fn graph_error_limits_display() {
        let err = GraphError::TooManyNodes {
            count: 12,
            limit: 10,
        };
        assert_eq!(err.to_string(), "workflow has 12 nodes, limit is 10");
    }

    #[test]
    fn graph_error_cycle_display() {
        let err = GraphError::CycleDetected {
            node_id: "loop".to_string(),
        };
        assert!(err.to_string().contains("'loop'"));
    }
}
