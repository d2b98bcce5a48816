//! Classification of failed workflow executions.
//!
//! This crate provides:
//!
//! - **Error records**: The failure record assembled from what the engine
//!   reported
//! - **Classifier**: An ordered rule table mapping error text to a category,
//!   severity and retryability
//! - **Retry advisor**: A tunable category to retry policy table
//! - **Summaries**: Counts over batches of errors
//!
//! Nothing here performs retries or sends alerts; callers act on the output.

pub mod category;
pub mod classify;
pub mod error;
pub mod record;
pub mod retry;
pub mod rules;
pub mod summary;

pub use category::{ErrorCategory, Impact, Severity};
pub use classify::{ErrorAnalysis, classify, should_alert};
pub use error::RecordError;
pub use record::ExecutionErrorRecord;
pub use retry::{BackoffStrategy, RetryPolicy, RetryPolicyTable, RetryStrategy, suggest_retry};
pub use summary::ErrorSummary;
