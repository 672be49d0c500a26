#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use fnpack_core::config::FnpackSettings;
use fnpack_core::context::ProjectContext;
use fnpack_core::error::{FailureCause, ScriptFailure};
use fnpack_core::runner::ScriptRunner;

/// Records every `(script, folder)` call; configured folders fail.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<(String, String)>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(folders: &[&str]) -> Self {
        Self {
            failing: folders.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Folders that ran `script`, in call order.
    pub fn folders_for(&self, script: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(s, _)| s == script)
            .map(|(_, folder)| folder)
            .collect()
    }
}

#[async_trait]
impl ScriptRunner for RecordingRunner {
    async fn run(&self, script: &str, folder: &str) -> Result<(), ScriptFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((script.to_string(), folder.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(folder) {
            return Err(ScriptFailure {
                folder: folder.to_string(),
                script: script.to_string(),
                cause: FailureCause::Exit(Some(1)),
            });
        }
        Ok(())
    }
}

/// Temp project with `serverless.yml` and default settings.
pub fn setup_project(manifest: &str) -> (TempDir, ProjectContext) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp.path().join("serverless.yml"), manifest).expect("Failed to write manifest");
    std::fs::create_dir_all(temp.path().join("functions")).expect("Failed to create functions dir");

    let ctx = ProjectContext::new(temp.path().to_path_buf(), FnpackSettings::default());
    (temp, ctx)
}

/// Create `functions/<folder>/package.json` declaring `scripts`.
pub fn write_function(root: &Path, folder: &str, scripts: &[&str]) {
    let dir = root.join("functions").join(folder);
    std::fs::create_dir_all(&dir).expect("Failed to create function dir");

    let scripts: serde_json::Map<String, serde_json::Value> = scripts
        .iter()
        .map(|s| (s.to_string(), serde_json::Value::String(format!("echo {}", s))))
        .collect();
    let package = serde_json::json!({
        "name": folder,
        "version": "1.0.0",
        "scripts": scripts,
    });
    std::fs::write(
        dir.join("package.json"),
        serde_json::to_string_pretty(&package).unwrap(),
    )
    .expect("Failed to write package.json");
}

pub fn read_manifest(root: &Path) -> String {
    std::fs::read_to_string(root.join("serverless.yml")).expect("Failed to read manifest")
}
