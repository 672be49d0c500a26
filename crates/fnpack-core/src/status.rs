//! Status collection for a serverless project.
//!
//! This module resolves, without running anything:
//! - the effective stage and service-level packaging defaults
//! - per-function folder, descriptor and script availability
//! - per-function effective `package.include` and `environment`

use std::path::PathBuf;

use serde::Serialize;

use crate::context::ProjectContext;
use crate::manifest::{Environment, FunctionSettings, PackageDefaults};
use crate::orchestration::{BUILD_SCRIPT, CLEAN_SCRIPT, StageContext};
use crate::package::PackageDescriptor;

// =============================================================================
// Data Structures
// =============================================================================

/// Overall project status
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub service: Option<String>,
    pub manifest: PathBuf,
    pub stage: String,
    pub production: bool,
    pub package: PackageDefaults,
    pub functions: Vec<FunctionStatus>,
    pub summary: StatusSummary,
}

/// Summary counts for quick overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub buildable: usize,
    pub disabled: usize,
    /// Enabled functions whose folder or descriptor is missing
    pub issues: usize,
}

/// Resolved view of one function
#[derive(Debug, Clone, Serialize)]
pub struct FunctionStatus {
    pub name: String,
    pub folder: String,
    pub disabled: bool,
    pub folder_exists: bool,
    pub has_descriptor: bool,
    pub scripts: Vec<String>,
    pub handler: Option<String>,
    pub include: Vec<String>,
    pub environment: Option<Environment>,
}

impl FunctionStatus {
    pub fn can_build(&self) -> bool {
        !self.disabled && self.scripts.iter().any(|s| s == BUILD_SCRIPT)
    }

    pub fn can_clean(&self) -> bool {
        !self.disabled && self.scripts.iter().any(|s| s == CLEAN_SCRIPT)
    }

    fn has_issue(&self) -> bool {
        !self.disabled && !(self.folder_exists && self.has_descriptor)
    }
}

// =============================================================================
// Command
// =============================================================================

/// Options for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// `--stage` override used to resolve the effective stage
    pub stage: Option<String>,
}

/// Status command: reads the manifest and the function folders
pub struct StatusCommand<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> StatusCommand<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }

    pub fn execute(&self, options: &StatusOptions) -> anyhow::Result<ServiceStatus> {
        let store = self.ctx.manifest_store();
        let manifest = store.load()?.service;
        let settings = self.ctx.settings();
        let scanner = self.ctx.scanner();

        let stage = StageContext::new()
            .with_stage(options.stage.clone())
            .with_provider_stage(manifest.provider_stage.clone());

        let mut functions = Vec::with_capacity(manifest.functions.len());
        for descriptor in &manifest.functions {
            let resolved = FunctionSettings::resolve(
                descriptor,
                &settings.functions_dir,
                self.ctx.project_root(),
            );

            let folder_path = self.ctx.functions_path().join(&resolved.folder);
            let descriptor_path = scanner.descriptor_path(&resolved.folder);
            let has_descriptor = descriptor_path.exists();
            let scripts = if has_descriptor {
                PackageDescriptor::load(&descriptor_path)?.script_names()
            } else {
                Vec::new()
            };

            functions.push(FunctionStatus {
                name: resolved.name,
                folder: resolved.folder,
                disabled: resolved.disabled,
                folder_exists: folder_path.is_dir(),
                has_descriptor,
                scripts,
                handler: descriptor.handler.clone(),
                include: resolved.include,
                environment: resolved.environment,
            });
        }

        let summary = StatusSummary {
            total: functions.len(),
            buildable: functions.iter().filter(|f| f.can_build()).count(),
            disabled: functions.iter().filter(|f| f.disabled).count(),
            issues: functions.iter().filter(|f| f.has_issue()).count(),
        };

        Ok(ServiceStatus {
            service: manifest.service.clone(),
            manifest: store.path().to_path_buf(),
            stage: stage.resolved_stage().to_string(),
            production: stage.is_production(),
            package: PackageDefaults::resolve(&manifest.package),
            functions,
            summary,
        })
    }
}
