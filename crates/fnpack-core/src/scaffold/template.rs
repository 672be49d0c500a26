//! Function template trees.
//!
//! The `default` template ships inside the binary. A project can replace it
//! and add overlays by pointing `templates_dir` at a directory laid out as
//! `<templates_dir>/default/...` and `<templates_dir>/<overlay>/...`.

use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::fs::{copy_tree, write_file};

pub const DEFAULT_TEMPLATE: &str = "default";

const EMBEDDED_DEFAULT: &[(&str, &str)] = &[
    (
        "package.json",
        include_str!("../../function-template/default/package.json"),
    ),
    (
        "src/index.js",
        include_str!("../../function-template/default/src/index.js"),
    ),
    (
        ".env.yml",
        include_str!("../../function-template/default/.env.yml"),
    ),
];

/// Where template trees come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    templates_dir: Option<PathBuf>,
}

impl TemplateSet {
    /// Built-in default template only.
    pub fn embedded() -> Self {
        Self::default()
    }

    pub fn from_dir(templates_dir: PathBuf) -> Self {
        Self {
            templates_dir: Some(templates_dir),
        }
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    /// Ensure every tree needed for `overlay` exists, without touching the
    /// target.
    pub fn check(&self, overlay: Option<&str>) -> Result<(), ValidationError> {
        if let Some(dir) = &self.templates_dir {
            let default = dir.join(DEFAULT_TEMPLATE);
            if !default.is_dir() {
                return Err(ValidationError::MissingTemplate(default));
            }
        }
        if let Some(overlay) = overlay {
            self.overlay_path(overlay)?;
        }
        Ok(())
    }

    /// Copy the default tree, then the overlay tree on top, into `target`.
    pub fn materialize(&self, overlay: Option<&str>, target: &Path) -> anyhow::Result<()> {
        match &self.templates_dir {
            Some(dir) => copy_tree(&dir.join(DEFAULT_TEMPLATE), target)?,
            None => {
                for (relative, contents) in EMBEDDED_DEFAULT {
                    write_file(&target.join(relative), contents.as_bytes())?;
                }
            }
        }

        if let Some(overlay) = overlay {
            let source = self.overlay_path(overlay)?;
            tracing::debug!(overlay, source = %source.display(), "Applying template overlay");
            copy_tree(&source, target)?;
        }
        Ok(())
    }

    fn overlay_path(&self, overlay: &str) -> Result<PathBuf, ValidationError> {
        let Some(dir) = &self.templates_dir else {
            return Err(ValidationError::MissingTemplate(PathBuf::from(overlay)));
        };
        let path = dir.join(overlay);
        if overlay.contains(['/', '\\']) || overlay == ".." || !path.is_dir() {
            return Err(ValidationError::MissingTemplate(path));
        }
        Ok(path)
    }
}
