//! Settings store for loading fnpack.toml.

use std::path::{Path, PathBuf};

use super::{FnpackSettings, parser};

pub const SETTINGS_FILE: &str = "fnpack.toml";

#[derive(Debug, Clone)]
pub struct SettingsStore {
    config_path: PathBuf,
    project_root: PathBuf,
}

impl SettingsStore {
    pub fn from_project_root(project_root: PathBuf) -> Self {
        Self {
            config_path: project_root.join(SETTINGS_FILE),
            project_root,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load settings, falling back to defaults when fnpack.toml is absent.
    pub fn load(&self) -> anyhow::Result<FnpackSettings> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No fnpack.toml, using defaults");
            return Ok(FnpackSettings::new());
        }
        parser::parse_settings_toml(&self.config_path)
    }
}
