//! Reading and patching a subproject's `package.json`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

/// A `package.json` object with its key order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    path: PathBuf,
    root: Map<String, Value>,
}

impl PackageDescriptor {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read package descriptor: {}", path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse package descriptor: {}", path.display()))?;
        match value {
            Value::Object(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            _ => anyhow::bail!("Expected JSON object at root: {}", path.display()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// Whether `scripts.<script>` is declared with a non-empty command.
    pub fn has_script(&self, script: &str) -> bool {
        match self.scripts_map().and_then(|scripts| scripts.get(script)) {
            Some(Value::String(command)) => !command.is_empty(),
            Some(Value::Null) | Some(Value::Bool(false)) | None => false,
            Some(_) => true,
        }
    }

    /// Declared script names in file order.
    pub fn script_names(&self) -> Vec<String> {
        self.scripts_map()
            .map(|scripts| scripts.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Set `name`, moving it in front of every other field.
    pub fn set_name_first(&mut self, name: &str) {
        let mut root = Map::with_capacity(self.root.len() + 1);
        root.insert("name".to_string(), Value::String(name.to_string()));
        for (key, value) in std::mem::take(&mut self.root) {
            if key != "name" {
                root.insert(key, value);
            }
        }
        self.root = root;
    }

    pub fn keys(&self) -> Vec<&str> {
        self.root.keys().map(String::as_str).collect()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let mut bytes =
            serde_json::to_vec_pretty(&self.root).context("Failed to serialize package descriptor")?;
        bytes.push(b'\n');
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write package descriptor: {}", self.path.display()))
    }

    fn scripts_map(&self) -> Option<&Map<String, Value>> {
        self.root.get("scripts").and_then(Value::as_object)
    }
}
