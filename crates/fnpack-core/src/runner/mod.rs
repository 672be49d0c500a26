//! Running package scripts inside function folders.
//!
//! The orchestrator and scaffolder only see the [`ScriptRunner`] trait; the
//! process-backed implementation lives in [`process`].

pub mod process;

use async_trait::async_trait;

pub use process::PackageManagerRunner;

use crate::error::ScriptFailure;

/// Value of the debug variable that turns on script output.
pub const DEBUG_WILDCARD: &str = "*";

/// Runs one script in one function folder.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, script: &str, folder: &str) -> Result<(), ScriptFailure>;
}

/// What happens to a child's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Child writes to our terminal
    Inherit,
    /// Child output is discarded
    #[default]
    Discard,
}

impl OutputMode {
    /// Inherit only when the debug variable is exactly `*`.
    pub fn from_debug_value(value: Option<&str>) -> Self {
        match value {
            Some(DEBUG_WILDCARD) => OutputMode::Inherit,
            _ => OutputMode::Discard,
        }
    }

    pub fn from_env(variable: &str) -> Self {
        Self::from_debug_value(std::env::var(variable).ok().as_deref())
    }
}
