//! Shared result type.
//!
//! Library crates (`flowscope-graph`, `flowscope-outcome`) return
//! `Result<T, TheirError>`; the CLI wraps those reports with its own
//! `CliError` context naming the input file.

use rootcause::Report;

/// Result carrying a rootcause [`Report`] with a typed context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
