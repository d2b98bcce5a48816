//! Structural analysis of workflow definitions.
//!
//! This crate inspects the node and connection graph of a workflow document
//! before it is handed to the execution engine:
//!
//! - **Document Model**: The engine's node list and nested connection map,
//!   accepted as-is
//! - **Graph View**: A petgraph graph of the resolved connections
//! - **Analysis**: Start/end nodes, type histogram, complexity and duration
//!   estimates
//! - **Validation**: Empty documents, dangling references and disconnected
//!   nodes
//! - **Limits**: Input-size guard applied at the boundary
//!
//! Every operation is a pure function of its input.

pub mod analysis;
pub mod definition;
pub mod duration;
pub mod edge;
pub mod error;
pub mod graph;
pub mod limits;
pub mod node;
pub mod validation;

pub use analysis::{AnalysisResult, analyze, analyze_with};
pub use definition::WorkflowDocument;
pub use duration::DurationTable;
pub use edge::{ConnectionTarget, EdgeRef, OutputSlot};
pub use error::{DocumentError, GraphError};
pub use graph::WorkflowGraph;
pub use limits::AnalysisLimits;
pub use node::NodeDefinition;
pub use validation::{ValidationIssue, ValidationResult, validate, validation_issues};
