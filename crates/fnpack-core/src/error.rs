//! Typed errors surfaced by fnpack operations.
//!
//! Most APIs return `anyhow::Result`; the errors below are the ones callers
//! are expected to inspect, via `anyhow::Error::downcast_ref::<FnpackError>()`.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FnpackError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Function '{0}' does not exist in the service manifest")]
    ManifestEntryNotFound(String),

    /// The manifest text does not follow the layout the line patcher relies on.
    #[error("Unsupported manifest layout: {0}")]
    ManifestFormat(String),

    #[error("Failed to serialize function entry: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error(transparent)]
    Script(#[from] ScriptFailure),

    #[error(transparent)]
    Aggregate(#[from] AggregateFailure),
}

/// Pre-condition failures raised before any filesystem change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Function folder already exists: {}", .0.display())]
    FolderExists(PathBuf),

    #[error("Function folder does not exist: {}", .0.display())]
    FolderMissing(PathBuf),

    #[error("Function '{0}' already exists in the service manifest")]
    EntryExists(String),

    #[error("Invalid function name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Function template not found: {}", .0.display())]
    MissingTemplate(PathBuf),
}

/// Why a single script invocation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// Process exited unsuccessfully; `None` when terminated by a signal.
    Exit(Option<i32>),
    /// Process could not be started at all.
    Spawn(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Exit(Some(code)) => write!(f, "exited with code {code}"),
            FailureCause::Exit(None) => write!(f, "terminated by signal"),
            FailureCause::Spawn(reason) => write!(f, "failed to start: {reason}"),
        }
    }
}

/// A build/clean/install script that did not succeed for one folder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Script '{script}' failed in function folder '{folder}': {cause}")]
pub struct ScriptFailure {
    pub folder: String,
    pub script: String,
    pub cause: FailureCause,
}

impl ScriptFailure {
    pub fn exit_code(&self) -> Option<i32> {
        match self.cause {
            FailureCause::Exit(code) => code,
            FailureCause::Spawn(_) => None,
        }
    }
}

/// One or more failures from a concurrent batch of scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateFailure {
    pub script: String,
    pub failures: Vec<ScriptFailure>,
}

impl AggregateFailure {
    /// Failing folders, in dispatch order.
    pub fn folders(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.folder.as_str()).collect()
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.failures.len() == 1 {
            "function"
        } else {
            "functions"
        };
        write!(
            f,
            "Script '{}' failed for {} {}: {}",
            self.script,
            self.failures.len(),
            noun,
            self.folders().join(", ")
        )
    }
}

impl std::error::Error for AggregateFailure {}
