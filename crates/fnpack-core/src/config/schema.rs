//! Configuration schema for fnpack.toml
//!
//! Every key is optional; a project without `fnpack.toml` uses the defaults,
//! which match the conventional serverless monorepo layout:
//!
//! ```toml
//! functions_dir = "functions"
//! manifest = "serverless.yml"
//! descriptor = "package.json"
//! package_manager = "yarn"
//! debug_env = "SLS_DEBUG"
//! templates_dir = "function-template"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Root configuration structure for fnpack.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FnpackSettings {
    /// Folder holding one subproject per function, relative to the project root
    #[serde(default = "default_functions_dir")]
    pub functions_dir: String,

    /// Service manifest file name
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Subproject descriptor file name inside each function folder
    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    /// Package manager used to run scripts (`<tool> <script>`)
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    /// Environment variable that, when set to `*`, shows script output
    #[serde(default = "default_debug_env")]
    pub debug_env: String,

    /// Directory holding `default/` and overlay template trees.
    /// Uses the built-in template when unset.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

fn default_functions_dir() -> String {
    "functions".to_string()
}

fn default_manifest() -> String {
    "serverless.yml".to_string()
}

fn default_descriptor() -> String {
    "package.json".to_string()
}

fn default_package_manager() -> String {
    "yarn".to_string()
}

fn default_debug_env() -> String {
    "SLS_DEBUG".to_string()
}

impl Default for FnpackSettings {
    fn default() -> Self {
        Self {
            functions_dir: default_functions_dir(),
            manifest: default_manifest(),
            descriptor: default_descriptor(),
            package_manager: default_package_manager(),
            debug_env: default_debug_env(),
            templates_dir: None,
        }
    }
}

impl FnpackSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the settings
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure_relative("functions_dir", Path::new(&self.functions_dir))?;
        ensure_relative("manifest", Path::new(&self.manifest))?;
        ensure_relative("descriptor", Path::new(&self.descriptor))?;
        if self.package_manager.trim().is_empty() {
            anyhow::bail!("'package_manager' cannot be empty");
        }
        if self.debug_env.trim().is_empty() {
            anyhow::bail!("'debug_env' cannot be empty");
        }
        Ok(())
    }
}

fn ensure_relative(key: &str, path: &Path) -> anyhow::Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("'{}' cannot be empty", key);
    }
    for component in path.components() {
        match component {
            Component::ParentDir => {
                anyhow::bail!("'{}' must stay inside the project: {}", key, path.display())
            }
            Component::Prefix(_) | Component::RootDir => {
                anyhow::bail!("'{}' must be a relative path: {}", key, path.display())
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = FnpackSettings::new();
        assert_eq!(settings.functions_dir, "functions");
        assert_eq!(settings.manifest, "serverless.yml");
        assert_eq!(settings.package_manager, "yarn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_absolute_functions_dir() {
        let settings = FnpackSettings {
            functions_dir: "/srv/functions".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_parent_traversal() {
        let settings = FnpackSettings {
            manifest: "../serverless.yml".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("inside the project"));
    }

    #[test]
    fn test_validate_rejects_empty_package_manager() {
        let settings = FnpackSettings {
            package_manager: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
