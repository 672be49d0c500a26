//! High-level commands for fnpack operations.
//!
//! This module provides the public API the CLI drives: build/clean passes,
//! lifecycle hooks, function scaffolding and status.

pub mod build;
pub mod function;

pub use build::{BuildCommand, BuildOptions, BuildReport};
pub use function::{AddFunctionOptions, FunctionCommand};

// Re-export status command types from the status module
pub use crate::status::{ServiceStatus, StatusCommand, StatusOptions};
