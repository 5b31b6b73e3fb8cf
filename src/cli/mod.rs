//! CLI module for the `foliorag` binary
//!
//! Command handlers and output formatting; argument parsing lives in the
//! binary entry point.

pub mod handlers;
pub mod output;

pub use handlers::*;
pub use output::*;
