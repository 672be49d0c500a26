//! Process-backed script runner (`<package manager> <script>`).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{OutputMode, ScriptRunner};
use crate::error::{FailureCause, ScriptFailure};

#[derive(Debug, Clone)]
pub struct PackageManagerRunner {
    tool: String,
    functions_dir: PathBuf,
    output: OutputMode,
}

impl PackageManagerRunner {
    pub fn new(tool: impl Into<String>, functions_dir: PathBuf, output: OutputMode) -> Self {
        Self {
            tool: tool.into(),
            functions_dir,
            output,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn functions_dir(&self) -> &Path {
        &self.functions_dir
    }

    fn stdio(&self) -> Stdio {
        match self.output {
            OutputMode::Inherit => Stdio::inherit(),
            OutputMode::Discard => Stdio::null(),
        }
    }
}

#[async_trait]
impl ScriptRunner for PackageManagerRunner {
    async fn run(&self, script: &str, folder: &str) -> Result<(), ScriptFailure> {
        let cwd = self.functions_dir.join(folder);
        tracing::debug!(tool = %self.tool, script, cwd = %cwd.display(), "Running script");

        let status = Command::new(&self.tool)
            .arg(script)
            .current_dir(&cwd)
            .stdin(Stdio::null())
            .stdout(self.stdio())
            .stderr(self.stdio())
            .status()
            .await
            .map_err(|e| ScriptFailure {
                folder: folder.to_string(),
                script: script.to_string(),
                cause: FailureCause::Spawn(format!("{} ({})", e, self.tool)),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScriptFailure {
                folder: folder.to_string(),
                script: script.to_string(),
                cause: FailureCause::Exit(status.code()),
            })
        }
    }
}
