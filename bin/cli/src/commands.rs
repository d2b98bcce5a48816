//! Command handlers.
//!
//! Handlers read one input file, write one JSON document to `out`, and
//! report whether the input passed.

use crate::config::InspectorConfig;
use crate::error::CliError;
use flowscope_core::Result;
use flowscope_graph::{WorkflowDocument, WorkflowGraph, analyze_with, validate};
use flowscope_outcome::{
    ErrorAnalysis, ErrorSummary, ExecutionErrorRecord, RetryStrategy, classify,
};
use rootcause::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::instrument;

/// Whether a command's input passed its checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The command ran but the input failed validation.
    Invalid,
}

/// JSON layout of command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Classification of one record, as printed by `classify`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
    pub analysis: ErrorAnalysis,
    pub retry: RetryStrategy,
    pub alert: bool,
}

/// Output of `classify`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyReport {
    pub results: Vec<ClassifiedRecord>,
    pub summary: ErrorSummary,
}

fn read_input(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).context(CliError::ReadInput {
        path: path.to_path_buf(),
    })
}

fn load_document(path: &Path, config: &InspectorConfig) -> Result<WorkflowDocument, CliError> {
    let text = read_input(path)?;
    let document = WorkflowDocument::from_json(&text).context(CliError::InvalidDocument {
        path: path.to_path_buf(),
    })?;
    config
        .limits
        .check(&document)
        .context(CliError::RejectedDocument {
            path: path.to_path_buf(),
        })?;
    Ok(document)
}

fn write_json<T: Serialize>(
    out: &mut impl Write,
    format: OutputFormat,
    value: &T,
) -> Result<(), CliError> {
    let written = match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value),
        OutputFormat::Compact => serde_json::to_writer(&mut *out, value),
    };
    written.context(CliError::WriteOutput)?;
    writeln!(out).context(CliError::WriteOutput)?;
    Ok(())
}

/// Prints the structural metrics of a workflow document.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a workflow document,
/// or exceeds the configured limits.
#[instrument(skip(config, out))]
pub fn analyze(
    path: &Path,
    config: &InspectorConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<CommandStatus, CliError> {
    let document = load_document(path, config)?;
    let result = analyze_with(&document, &config.durations);
    tracing::info!(
        nodes = result.node_count,
        complexity = result.complexity_score,
        "Analyzed workflow"
    );
    write_json(out, format, &result)?;
    Ok(CommandStatus::Success)
}

/// Prints the validation result of a workflow document.
///
/// Returns [`CommandStatus::Invalid`] when the document has structural
/// errors.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a workflow document,
/// or exceeds the configured limits.
#[instrument(skip(config, out))]
pub fn validate_document(
    path: &Path,
    config: &InspectorConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<CommandStatus, CliError> {
    let document = load_document(path, config)?;
    let result = validate(&document);
    if result.valid {
        tracing::info!("Workflow is valid");
    } else {
        tracing::warn!(errors = result.errors.len(), "Workflow is invalid");
    }
    write_json(out, format, &result)?;
    Ok(if result.valid {
        CommandStatus::Success
    } else {
        CommandStatus::Invalid
    })
}

/// Prints node ids in execution order.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or has a cycle.
#[instrument(skip(config, out))]
pub fn execution_order(
    path: &Path,
    config: &InspectorConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<CommandStatus, CliError> {
    let document = load_document(path, config)?;
    let graph = WorkflowGraph::from_document(&document);
    let order = graph.execution_order().context(CliError::NoExecutionOrder {
        path: path.to_path_buf(),
    })?;
    write_json(out, format, &order)?;
    Ok(CommandStatus::Success)
}

/// Classifies execution error records and prints retry advice.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no records.
#[instrument(skip(config, out))]
pub fn classify_records(
    path: &Path,
    config: &InspectorConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<CommandStatus, CliError> {
    let text = read_input(path)?;
    let records = ExecutionErrorRecord::parse_many(&text).context(CliError::InvalidRecords {
        path: path.to_path_buf(),
    })?;

    let results: Vec<_> = records
        .iter()
        .map(|record| {
            let analysis = classify(record);
            ClassifiedRecord {
                retry: config.retry.suggest(&analysis),
                alert: analysis.should_alert(),
                analysis,
            }
        })
        .collect();
    let summary = ErrorSummary::from_records(&records);
    tracing::info!(
        total = summary.total,
        alerts = summary.alerts,
        "Classified execution errors"
    );

    write_json(out, format, &ClassifyReport { results, summary })?;
    Ok(CommandStatus::Success)
}
