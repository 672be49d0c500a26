//! Function add/remove commands.

use crate::context::ProjectContext;
use crate::manifest::LinePatcher;
use crate::runner::ScriptRunner;
use crate::scaffold::{FunctionScaffolder, ScaffoldReport};

/// Options for `function add`
#[derive(Debug, Clone)]
pub struct AddFunctionOptions {
    pub name: String,
    /// Overlay template applied on top of `default`
    pub template: Option<String>,
}

impl AddFunctionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }
}

pub struct FunctionCommand<'a> {
    ctx: &'a ProjectContext,
    runner: &'a dyn ScriptRunner,
    editor: LinePatcher,
}

impl<'a> FunctionCommand<'a> {
    pub fn new(ctx: &'a ProjectContext, runner: &'a dyn ScriptRunner) -> Self {
        Self {
            ctx,
            runner,
            editor: LinePatcher::new(),
        }
    }

    pub async fn add(&self, options: &AddFunctionOptions) -> anyhow::Result<ScaffoldReport> {
        self.scaffolder()
            .add_function(&options.name, options.template.as_deref())
            .await
    }

    pub async fn remove(&self, name: &str) -> anyhow::Result<()> {
        self.scaffolder().remove_function(name).await
    }

    fn scaffolder(&self) -> FunctionScaffolder<'_> {
        FunctionScaffolder::new(self.ctx, &self.editor, self.runner)
    }
}
