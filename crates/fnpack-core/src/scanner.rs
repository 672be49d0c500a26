//! Discovery of function folders that declare a given script.

use std::path::{Path, PathBuf};

use crate::manifest::FunctionDescriptor;
use crate::package::PackageDescriptor;

/// Finds buildable function subprojects under the functions folder.
#[derive(Debug, Clone)]
pub struct FolderScanner {
    functions_dir: PathBuf,
    descriptor: String,
}

impl FolderScanner {
    pub fn new(functions_dir: PathBuf, descriptor: impl Into<String>) -> Self {
        Self {
            functions_dir,
            descriptor: descriptor.into(),
        }
    }

    pub fn functions_dir(&self) -> &Path {
        &self.functions_dir
    }

    /// Path of the descriptor file inside a function folder.
    pub fn descriptor_path(&self, folder: &str) -> PathBuf {
        self.functions_dir.join(folder).join(&self.descriptor)
    }

    /// Folders, in manifest order, whose descriptor declares `script`.
    ///
    /// Skips functions with `custom.build: false` and functions without a
    /// descriptor. `only` restricts the scan to one function name; an unknown
    /// name yields an empty list.
    pub fn list_folders_with(
        &self,
        functions: &[FunctionDescriptor],
        script: &str,
        only: Option<&str>,
    ) -> anyhow::Result<Vec<String>> {
        let mut folders = Vec::new();

        for function in functions {
            if only.is_some_and(|name| name != function.name) {
                continue;
            }
            if function.disabled {
                tracing::debug!(function = %function.name, "Build disabled, skipping");
                continue;
            }

            let folder = function.folder();
            let descriptor_path = self.descriptor_path(folder);
            if !descriptor_path.exists() {
                tracing::debug!(function = %function.name, path = %descriptor_path.display(), "No package descriptor, skipping");
                continue;
            }

            let descriptor = PackageDescriptor::load(&descriptor_path)?;
            if descriptor.has_script(script) {
                folders.push(folder.to_string());
            } else {
                tracing::debug!(function = %function.name, script, "Script not declared, skipping");
            }
        }

        Ok(folders)
    }
}
