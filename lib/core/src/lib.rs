//! Core utilities shared by the flowscope crates.
//!
//! The workflow analyzer and the execution outcome classifier are independent
//! of each other; the only thing they share is the error handling convention
//! defined here.

pub mod error;

pub use error::Result;
