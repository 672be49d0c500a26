//! Build and clean passes over all function folders.

use futures::future::join_all;

use super::StageContext;
use super::lifecycle::{HookStep, LifecycleHook};
use crate::error::{AggregateFailure, FnpackError, ScriptFailure};
use crate::manifest::FunctionDescriptor;
use crate::runner::ScriptRunner;
use crate::scanner::FolderScanner;

pub const BUILD_SCRIPT: &str = "build";
pub const CLEAN_SCRIPT: &str = "clean";

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub script: String,
    /// Folders the script ran in
    pub folders: Vec<String>,
    /// True when the pass was not needed and nothing ran
    pub skipped: bool,
}

impl PassReport {
    fn skipped(script: &str) -> Self {
        Self {
            script: script.to_string(),
            folders: Vec::new(),
            skipped: true,
        }
    }
}

/// Runs build/clean scripts for every eligible function concurrently.
///
/// All scripts of a pass are started together and awaited together: a
/// failing folder never cancels the others, and the pass fails afterwards
/// with an [`AggregateFailure`] naming every failing folder.
pub struct BuildOrchestrator<'a> {
    functions: &'a [FunctionDescriptor],
    scanner: &'a FolderScanner,
    runner: &'a dyn ScriptRunner,
    context: StageContext,
}

impl<'a> BuildOrchestrator<'a> {
    pub fn new(
        functions: &'a [FunctionDescriptor],
        scanner: &'a FolderScanner,
        runner: &'a dyn ScriptRunner,
        context: StageContext,
    ) -> Self {
        Self {
            functions,
            scanner,
            runner,
            context,
        }
    }

    pub fn context(&self) -> &StageContext {
        &self.context
    }

    /// Clean pass; a no-op unless the stage context asks for a clean.
    pub async fn run_clean(&self, function: Option<&str>) -> anyhow::Result<PassReport> {
        if !self.context.clean_needed() {
            tracing::debug!(stage = self.context.resolved_stage(), "Clean not needed");
            return Ok(PassReport::skipped(CLEAN_SCRIPT));
        }

        let plural = if function.is_some() { "" } else { "s" };
        tracing::info!("Cleaning function build output{}...", plural);
        let folders = self
            .scanner
            .list_folders_with(self.functions, CLEAN_SCRIPT, function)?;
        self.run_pass(CLEAN_SCRIPT, "Cleaning", folders).await
    }

    /// Build pass.
    pub async fn run_build(&self, function: Option<&str>) -> anyhow::Result<PassReport> {
        let plural = if function.is_some() { "" } else { "s" };
        tracing::info!("Building function{}...", plural);
        let folders = self
            .scanner
            .list_folders_with(self.functions, BUILD_SCRIPT, function)?;
        self.run_pass(BUILD_SCRIPT, "Building", folders).await
    }

    /// Run the steps of a lifecycle hook in order; each step starts only after
    /// the previous one settled successfully.
    pub async fn run_hook(
        &self,
        hook: LifecycleHook,
        function: Option<&str>,
    ) -> anyhow::Result<Vec<PassReport>> {
        tracing::debug!(hook = hook.event_name(), "Running lifecycle hook");
        let mut reports = Vec::with_capacity(hook.steps().len());
        for step in hook.steps() {
            let report = match step {
                HookStep::Clean => self.run_clean(function).await?,
                HookStep::Build => self.run_build(function).await?,
            };
            reports.push(report);
        }
        Ok(reports)
    }

    async fn run_pass(
        &self,
        script: &str,
        verb: &str,
        folders: Vec<String>,
    ) -> anyhow::Result<PassReport> {
        let results = join_all(folders.iter().map(|folder| async move {
            let result = self.runner.run(script, folder).await;
            if let Err(failure) = &result {
                tracing::error!(%failure, "{} function {} failed.", verb, folder);
            }
            result
        }))
        .await;

        let failures: Vec<ScriptFailure> = results.into_iter().filter_map(Result::err).collect();
        if !failures.is_empty() {
            return Err(FnpackError::Aggregate(AggregateFailure {
                script: script.to_string(),
                failures,
            })
            .into());
        }

        Ok(PassReport {
            script: script.to_string(),
            folders,
            skipped: false,
        })
    }
}
