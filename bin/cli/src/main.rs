use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flowscope_cli::commands;
use flowscope_cli::{CliError, CommandStatus, InspectorConfig, OutputFormat};
use flowscope_core::Result;
use rootcause::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// flowscope - inspect workflow documents and classify failed executions
#[derive(Parser)]
#[command(name = "flowscope")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print structural metrics of a workflow
    Analyze {
        /// Path to the workflow document (JSON)
        workflow_file: PathBuf,
    },

    /// Check a workflow for structural errors; exits with 1 when invalid
    Validate {
        /// Path to the workflow document (JSON)
        workflow_file: PathBuf,
    },

    /// Print node ids in execution order
    Order {
        /// Path to the workflow document (JSON)
        workflow_file: PathBuf,
    },

    /// Classify execution errors and suggest retries
    Classify {
        /// Path to an error record or an array of records (JSON)
        errors_file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(CommandStatus::Success) => ExitCode::SUCCESS,
        Ok(CommandStatus::Invalid) => ExitCode::from(1),
        Err(report) => {
            eprintln!("{report}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<CommandStatus, CliError> {
    let config = InspectorConfig::load(cli.config.as_deref()).context(CliError::LoadConfig)?;
    tracing::debug!(?config, "Loaded configuration");

    let format = if cli.compact {
        OutputFormat::Compact
    } else {
        OutputFormat::Pretty
    };
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Analyze { workflow_file } => {
            commands::analyze(&workflow_file, &config, format, &mut out)
        }
        Command::Validate { workflow_file } => {
            commands::validate_document(&workflow_file, &config, format, &mut out)
        }
        Command::Order { workflow_file } => {
            commands::execution_order(&workflow_file, &config, format, &mut out)
        }
        Command::Classify { errors_file } => {
            commands::classify_records(&errors_file, &config, format, &mut out)
        }
    }
}
