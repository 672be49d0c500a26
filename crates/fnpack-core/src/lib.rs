//! fnpack Core Library
//!
//! Build orchestration for serverless services whose functions live as
//! independent subprojects under a shared functions folder: concurrent
//! build/clean passes, function scaffolding and manifest patching.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod manifest;
pub mod orchestration;
pub mod package;
pub mod runner;
pub mod scaffold;
pub mod scanner;
pub mod status;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{FnpackSettings, SettingsStore};
    pub use crate::context::ProjectContext;

    // Errors
    pub use crate::error::{AggregateFailure, FnpackError, ScriptFailure, ValidationError};

    // Manifest
    pub use crate::manifest::{
        FunctionDescriptor, FunctionEntry, LinePatcher, ManifestDocument, ManifestEditor,
        ServiceManifest,
    };

    // Orchestration
    pub use crate::orchestration::{BuildOrchestrator, LifecycleHook, StageContext};
    pub use crate::runner::{PackageManagerRunner, ScriptRunner};
    pub use crate::scaffold::FunctionScaffolder;
    pub use crate::scanner::FolderScanner;
}
