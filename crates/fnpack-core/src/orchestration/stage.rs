//! Stage-dependent decisions for a single invocation.

const DEFAULT_STAGE: &str = "dev";
const PRODUCTION_STAGES: [&str; 2] = ["prod", "production"];
const CLEAN_COMMAND: &str = "clean";

/// Ambient inputs supplied by whoever invokes fnpack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageContext {
    /// `--stage` option
    pub stage: Option<String>,
    /// `provider.stage` from the manifest
    pub provider_stage: Option<String>,
    /// `--clean` flag
    pub clean: bool,
    /// Name of the command being run (`build`, `clean`, `deploy`, ...)
    pub command: Option<String>,
}

impl StageContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage(mut self, stage: Option<impl Into<String>>) -> Self {
        self.stage = stage.map(Into::into);
        self
    }

    pub fn with_provider_stage(mut self, stage: Option<impl Into<String>>) -> Self {
        self.provider_stage = stage.map(Into::into);
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Option stage, else provider stage, else `dev`.
    pub fn resolved_stage(&self) -> &str {
        self.stage
            .as_deref()
            .or(self.provider_stage.as_deref())
            .unwrap_or(DEFAULT_STAGE)
    }

    pub fn is_production(&self) -> bool {
        let stage = self.resolved_stage().to_lowercase();
        PRODUCTION_STAGES.contains(&stage.as_str())
    }

    /// Clean runs when forced, when `clean` itself is the command, or for
    /// production stages.
    pub fn clean_needed(&self) -> bool {
        self.clean || self.command.as_deref() == Some(CLEAN_COMMAND) || self.is_production()
    }
}
