//! Manifest store for reading and writing the service manifest file.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{ManifestDocument, ServiceManifest};

/// Manifest text and the snapshot parsed from it.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub document: ManifestDocument,
    pub service: ServiceManifest,
}

#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_text(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read service manifest: {}", self.path.display()))
    }

    pub fn load(&self) -> anyhow::Result<LoadedManifest> {
        let text = self.read_text()?;
        let service = ServiceManifest::parse(&text)
            .with_context(|| format!("Failed to parse service manifest: {}", self.path.display()))?;
        Ok(LoadedManifest {
            document: ManifestDocument::from_text(&text),
            service,
        })
    }

    pub fn save(&self, document: &ManifestDocument) -> anyhow::Result<()> {
        std::fs::write(&self.path, document.to_text())
            .with_context(|| format!("Failed to write service manifest: {}", self.path.display()))
    }
}
