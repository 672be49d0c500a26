//! Project context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::config::{FnpackSettings, SettingsStore};
use crate::manifest::ManifestStore;
use crate::runner::{OutputMode, PackageManagerRunner};
use crate::scaffold::TemplateSet;
use crate::scanner::FolderScanner;

/// Unified project context.
///
/// Holds the project root and the resolved settings. Frontends create this
/// once and pass it to commands, which pull the services they need from it.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    project_root: PathBuf,
    settings: FnpackSettings,
}

impl ProjectContext {
    /// Create a context with explicit settings.
    pub fn new(project_root: PathBuf, settings: FnpackSettings) -> Self {
        Self {
            project_root,
            settings,
        }
    }

    /// Create a context, reading `fnpack.toml` from the project root if present.
    pub fn load(project_root: PathBuf) -> anyhow::Result<Self> {
        let settings = SettingsStore::from_project_root(project_root.clone()).load()?;
        Ok(Self::new(project_root, settings))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn settings(&self) -> &FnpackSettings {
        &self.settings
    }

    /// Functions folder under the project root.
    pub fn functions_path(&self) -> PathBuf {
        self.project_root.join(&self.settings.functions_dir)
    }

    pub fn manifest_store(&self) -> ManifestStore {
        ManifestStore::new(self.project_root.join(&self.settings.manifest))
    }

    pub fn scanner(&self) -> FolderScanner {
        FolderScanner::new(self.functions_path(), self.settings.descriptor.clone())
    }

    /// Process-backed runner; child output follows the debug variable.
    pub fn script_runner(&self) -> PackageManagerRunner {
        PackageManagerRunner::new(
            self.settings.package_manager.clone(),
            self.functions_path(),
            OutputMode::from_env(&self.settings.debug_env),
        )
    }

    pub fn templates(&self) -> TemplateSet {
        match &self.settings.templates_dir {
            Some(dir) => TemplateSet::from_dir(self.project_root.join(dir)),
            None => TemplateSet::embedded(),
        }
    }
}
