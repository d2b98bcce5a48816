//! Command line inspector for workflow documents and execution errors.
//!
//! The binary reads documents from disk, runs the analyzer or classifier,
//! and prints JSON to stdout. Logs go to stderr.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{CommandStatus, OutputFormat};
pub use config::InspectorConfig;
pub use error::CliError;
