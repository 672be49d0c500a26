//! Build, clean and lifecycle hook commands.

use crate::context::ProjectContext;
use crate::orchestration::{
    BUILD_SCRIPT, BuildOrchestrator, CLEAN_SCRIPT, LifecycleHook, PassReport, StageContext,
};
use crate::runner::ScriptRunner;

/// Options shared by build, clean and hook commands
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Restrict the pass to a single function
    pub function: Option<String>,
    /// `--stage` override
    pub stage: Option<String>,
    /// Force a clean pass
    pub clean: bool,
    /// Name of the host command being run; drives the clean decision
    pub command: Option<String>,
}

impl BuildOptions {
    /// Options for the `build` command
    pub fn build() -> Self {
        Self {
            command: Some(BUILD_SCRIPT.to_string()),
            ..Self::default()
        }
    }

    /// Options for the `clean` command
    pub fn clean() -> Self {
        Self {
            command: Some(CLEAN_SCRIPT.to_string()),
            ..Self::default()
        }
    }

    pub fn with_function(mut self, function: Option<String>) -> Self {
        self.function = function;
        self
    }

    pub fn with_stage(mut self, stage: Option<String>) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn with_command(mut self, command: Option<String>) -> Self {
        self.command = command;
        self
    }
}

/// Passes run by a command, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub stage: String,
    pub passes: Vec<PassReport>,
}

impl BuildReport {
    /// Folders the given script ran in, across all passes.
    pub fn folders_for(&self, script: &str) -> Vec<&str> {
        self.passes
            .iter()
            .filter(|p| p.script == script)
            .flat_map(|p| p.folders.iter().map(String::as_str))
            .collect()
    }
}

/// Build command orchestrator
pub struct BuildCommand<'a> {
    ctx: &'a ProjectContext,
    runner: &'a dyn ScriptRunner,
}

impl<'a> BuildCommand<'a> {
    pub fn new(ctx: &'a ProjectContext, runner: &'a dyn ScriptRunner) -> Self {
        Self { ctx, runner }
    }

    /// Clean (when needed), then build.
    pub async fn build(&self, options: &BuildOptions) -> anyhow::Result<BuildReport> {
        self.run(LifecycleHook::BeforePackageFunction, options).await
    }

    /// Clean pass only.
    pub async fn clean(&self, options: &BuildOptions) -> anyhow::Result<BuildReport> {
        self.run(LifecycleHook::PackageCleanup, options).await
    }

    /// Run the steps bound to a lifecycle event.
    pub async fn hook(
        &self,
        hook: LifecycleHook,
        options: &BuildOptions,
    ) -> anyhow::Result<BuildReport> {
        self.run(hook, options).await
    }

    async fn run(&self, hook: LifecycleHook, options: &BuildOptions) -> anyhow::Result<BuildReport> {
        let manifest = self.ctx.manifest_store().load()?.service;
        let scanner = self.ctx.scanner();

        if let Some(function) = options.function.as_deref()
            && !manifest.contains_function(function)
        {
            tracing::warn!(function, "Function is not declared in the service manifest");
        }

        let stage = StageContext {
            stage: options.stage.clone(),
            provider_stage: manifest.provider_stage.clone(),
            clean: options.clean,
            command: options.command.clone(),
        };
        let resolved_stage = stage.resolved_stage().to_string();

        let orchestrator = BuildOrchestrator::new(&manifest.functions, &scanner, self.runner, stage);
        let passes = orchestrator.run_hook(hook, options.function.as_deref()).await?;

        Ok(BuildReport {
            stage: resolved_stage,
            passes,
        })
    }
}
