//! Build/clean orchestration across function subprojects.

pub mod lifecycle;
pub mod orchestrator;
pub mod stage;

pub use lifecycle::{HookStep, LifecycleHook};
pub use orchestrator::{BUILD_SCRIPT, BuildOrchestrator, CLEAN_SCRIPT, PassReport};
pub use stage::StageContext;
