//! Error types for the command line inspector.
//!
//! Each variant is a context layer added on top of the library report that
//! caused it.

use std::fmt;
use std::path::PathBuf;

/// Command failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Configuration could not be loaded.
    LoadConfig,
    /// An input file could not be read.
    ReadInput { path: PathBuf },
    /// The file is not a workflow document.
    InvalidDocument { path: PathBuf },
    /// The document exceeds the configured limits.
    RejectedDocument { path: PathBuf },
    /// Execution order requested for a cyclic workflow.
    NoExecutionOrder { path: PathBuf },
    /// The file does not contain execution error records.
    InvalidRecords { path: PathBuf },
    /// Results could not be written.
    WriteOutput,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadConfig => write!(f, "failed to load configuration"),
            Self::ReadInput { path } => write!(f, "failed to read '{}'", path.display()),
            Self::InvalidDocument { path } => {
                write!(f, "'{}' is not a workflow document", path.display())
            }
            Self::RejectedDocument { path } => {
                write!(f, "'{}' exceeds the analysis limits", path.display())
            }
            Self::NoExecutionOrder { path } => {
                write!(f, "'{}' has no execution order", path.display())
            }
            Self::InvalidRecords { path } => {
                write!(f, "'{}' does not contain execution error records", path.display())
            }
            Self::WriteOutput => write!(f, "failed to write output"),
        }
    }
}

impl std::error::Error for CliError {}
