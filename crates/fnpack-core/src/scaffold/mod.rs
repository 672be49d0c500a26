//! Creating and removing function subprojects.

pub mod naming;
pub mod template;

pub use naming::{dash_case, validate_function_name};
pub use template::{DEFAULT_TEMPLATE, TemplateSet};

use std::path::PathBuf;

use anyhow::Context;

use crate::context::ProjectContext;
use crate::error::{FnpackError, ValidationError};
use crate::manifest::{FunctionEntry, ManifestEditor, ManifestStore};
use crate::package::PackageDescriptor;
use crate::runner::ScriptRunner;

pub const INSTALL_SCRIPT: &str = "install";

/// Outcome of a successful `add_function`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub name: String,
    pub folder: PathBuf,
    /// `name` written into the subproject descriptor
    pub package_name: String,
}

/// Adds and removes function subprojects together with their manifest entry.
///
/// Neither operation is atomic: checks happen up front, but a failure after
/// the first filesystem write leaves whatever was already written.
pub struct FunctionScaffolder<'a> {
    functions_dir: String,
    functions_path: PathBuf,
    descriptor: String,
    manifest: ManifestStore,
    templates: TemplateSet,
    editor: &'a dyn ManifestEditor,
    runner: &'a dyn ScriptRunner,
}

impl<'a> FunctionScaffolder<'a> {
    pub fn new(
        ctx: &ProjectContext,
        editor: &'a dyn ManifestEditor,
        runner: &'a dyn ScriptRunner,
    ) -> Self {
        Self {
            functions_dir: ctx.settings().functions_dir.clone(),
            functions_path: ctx.functions_path(),
            descriptor: ctx.settings().descriptor.clone(),
            manifest: ctx.manifest_store(),
            templates: ctx.templates(),
            editor,
            runner,
        }
    }

    /// Scaffold `name` from the default template, optionally overlaid.
    pub async fn add_function(
        &self,
        name: &str,
        overlay: Option<&str>,
    ) -> anyhow::Result<ScaffoldReport> {
        validate_function_name(name).map_err(FnpackError::from)?;

        let folder = self.functions_path.join(name);
        if folder.exists() {
            return Err(FnpackError::from(ValidationError::FolderExists(folder)).into());
        }

        let loaded = self.manifest.load()?;
        if loaded.service.contains_function(name) {
            return Err(FnpackError::from(ValidationError::EntryExists(name.to_string())).into());
        }

        self.templates.check(overlay).map_err(FnpackError::from)?;

        let entry = FunctionEntry::scaffold(&self.functions_dir, name);
        let patched = self.editor.insert_function(&loaded.document, name, &entry)?;

        tracing::info!(function = name, "Creating function folder {}", folder.display());
        std::fs::create_dir_all(&folder)
            .with_context(|| format!("Failed to create function folder: {}", folder.display()))?;
        self.templates.materialize(overlay, &folder)?;

        let package_name = dash_case(name);
        let descriptor_path = folder.join(&self.descriptor);
        if descriptor_path.exists() {
            let mut descriptor = PackageDescriptor::load(&descriptor_path)?;
            descriptor.set_name_first(&package_name);
            descriptor.save()?;
        } else {
            tracing::warn!(
                path = %descriptor_path.display(),
                "Template has no package descriptor, name not written"
            );
        }

        self.manifest.save(&patched)?;
        tracing::info!(function = name, "Added function entry to {}", self.manifest.path().display());

        tracing::info!(function = name, "Installing dependencies...");
        self.runner
            .run(INSTALL_SCRIPT, name)
            .await
            .map_err(FnpackError::from)?;

        Ok(ScaffoldReport {
            name: name.to_string(),
            folder,
            package_name,
        })
    }

    /// Delete the folder of `name` and its manifest block.
    pub async fn remove_function(&self, name: &str) -> anyhow::Result<()> {
        validate_function_name(name).map_err(FnpackError::from)?;

        let folder = self.functions_path.join(name);
        if !folder.is_dir() {
            return Err(FnpackError::from(ValidationError::FolderMissing(folder)).into());
        }

        let loaded = self.manifest.load()?;
        if !loaded.service.contains_function(name) {
            return Err(FnpackError::ManifestEntryNotFound(name.to_string()).into());
        }
        let patched = self.editor.remove_function(&loaded.document, name)?;

        tracing::info!(function = name, "Removing function folder {}", folder.display());
        tokio::fs::remove_dir_all(&folder)
            .await
            .with_context(|| format!("Failed to remove function folder: {}", folder.display()))?;

        self.manifest.save(&patched)?;
        tracing::info!(function = name, "Removed function entry from {}", self.manifest.path().display());
        Ok(())
    }
}
