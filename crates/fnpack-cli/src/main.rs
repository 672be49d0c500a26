//! fnpack - build orchestration for serverless function subprojects
//!
//! Usage:
//!   fnpack build [--clean] [-f NAME]   # Clean when needed, then build
//!   fnpack clean [-f NAME]             # Clean build outputs
//!   fnpack function add -n NAME        # Scaffold a function
//!   fnpack hook <EVENT>                # Fire a packaging lifecycle event
//!   fnpack status                      # Show resolved function settings

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fnpack_core::commands::{
    AddFunctionOptions, BuildCommand, BuildOptions, BuildReport, FunctionCommand, StatusCommand,
    StatusOptions,
};
use fnpack_core::context::ProjectContext;
use fnpack_core::orchestration::LifecycleHook;
use fnpack_core::status::{FunctionStatus, ServiceStatus};

#[derive(Parser)]
#[command(name = "fnpack")]
#[command(about = "Build orchestration for serverless function subprojects", long_about = None)]
struct Cli {
    /// Project root containing the service manifest (defaults to the current directory)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every function (cleaning first when requested or on production stages)
    Build {
        /// Clean build outputs before building
        #[arg(long)]
        clean: bool,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Clean build outputs
    Clean {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Add or remove a function subproject
    Function(FunctionArgs),

    /// Run the steps bound to a packaging lifecycle event
    ///
    /// Events: package:cleanup, before:package:function:package,
    /// before:package:createDeploymentArtifacts
    Hook {
        /// Lifecycle event name
        event: String,

        /// Force a clean pass
        #[arg(long)]
        clean: bool,

        /// Host command that fired the event (e.g. deploy, package)
        #[arg(long)]
        command: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show resolved function settings
    Status {
        /// Stage used to resolve production defaults
        #[arg(long)]
        stage: Option<String>,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Only this function
    #[arg(short = 'f', long)]
    function: Option<String>,

    /// Deployment stage
    #[arg(short = 's', long)]
    stage: Option<String>,
}

#[derive(Args)]
struct FunctionArgs {
    #[command(subcommand)]
    command: FunctionSubcommand,
}

#[derive(Subcommand)]
enum FunctionSubcommand {
    /// Scaffold a new function from the template and register it
    Add {
        /// Function name
        #[arg(short, long)]
        name: String,

        /// Template overlay applied on top of the default template
        #[arg(long)]
        template: Option<String>,
    },

    /// Delete a function folder and its manifest entry
    #[command(alias = "rm")]
    Remove {
        /// Function name
        #[arg(short, long)]
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fnpack=info,fnpack_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let project_root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let ctx = ProjectContext::load(project_root)?;
    tracing::debug!(root = %ctx.project_root().display(), "Loaded project context");

    run_cli(&ctx, cli.command).await
}

async fn run_cli(ctx: &ProjectContext, command: Commands) -> Result<()> {
    let runner = ctx.script_runner();

    match command {
        Commands::Build { clean, target } => {
            let options = BuildOptions::build()
                .with_clean(clean)
                .with_function(target.function)
                .with_stage(target.stage);
            let report = BuildCommand::new(ctx, &runner).build(&options).await?;
            print_build_report(&report);
        }
        Commands::Clean { target } => {
            let options = BuildOptions::clean()
                .with_function(target.function)
                .with_stage(target.stage);
            let report = BuildCommand::new(ctx, &runner).clean(&options).await?;
            print_build_report(&report);
        }
        Commands::Hook {
            event,
            clean,
            command,
            target,
        } => {
            let hook: LifecycleHook = event.parse()?;
            let options = BuildOptions::default()
                .with_clean(clean)
                .with_command(command)
                .with_function(target.function)
                .with_stage(target.stage);
            let report = BuildCommand::new(ctx, &runner).hook(hook, &options).await?;
            print_build_report(&report);
        }
        Commands::Function(args) => {
            let cmd = FunctionCommand::new(ctx, &runner);
            match args.command {
                FunctionSubcommand::Add { name, template } => {
                    let options = AddFunctionOptions::new(name).with_template(template);
                    let report = cmd.add(&options).await?;
                    println!("✓ Added function '{}'", report.name);
                    println!("  Folder:  {}", report.folder.display());
                    println!("  Package: {}", report.package_name);
                }
                FunctionSubcommand::Remove { name } => {
                    cmd.remove(&name).await?;
                    println!("✓ Removed function '{}'", name);
                }
            }
        }
        Commands::Status { stage, format } => {
            let status = StatusCommand::new(ctx).execute(&StatusOptions { stage })?;
            match format {
                OutputFormat::Table => print_status_table(&status),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
            }
        }
    }
    Ok(())
}

fn print_build_report(report: &BuildReport) {
    for pass in &report.passes {
        if pass.skipped {
            continue;
        }
        if pass.folders.is_empty() {
            println!("• No function declares a '{}' script", pass.script);
        } else {
            println!(
                "✓ {} ({}): {}",
                pass.script,
                report.stage,
                pass.folders.join(", ")
            );
        }
    }
}

fn print_status_table(status: &ServiceStatus) {
    // Header
    if let Some(ref service) = status.service {
        println!("Service: {}", service);
    }
    println!("Manifest: {}", status.manifest.display());
    let production = if status.production { " (production)" } else { "" };
    println!("Stage: {}{}", status.stage, production);
    println!(
        "Packaging: individually={} excludeDevDependencies={} exclude={}",
        status.package.individually,
        status.package.exclude_dev_dependencies,
        status.package.exclude.join(",")
    );
    println!();

    if status.functions.is_empty() {
        println!("No functions declared.");
        println!("Create one with: fnpack function add -n <name>");
        return;
    }

    println!("Functions ({}):", status.functions.len());
    print_functions_table(&status.functions);
    println!();

    let summary = &status.summary;
    if summary.issues > 0 {
        println!(
            "Summary: {} functions, {} buildable, {} disabled, {} issues",
            summary.total, summary.buildable, summary.disabled, summary.issues
        );
    } else {
        println!(
            "Summary: {} functions, {} buildable, {} disabled, all OK",
            summary.total, summary.buildable, summary.disabled
        );
    }
}

fn print_functions_table(functions: &[FunctionStatus]) {
    println!(
        "  {:<18} {:<18} {:<7} {:<7} Include",
        "Name", "Folder", "Build", "Clean"
    );
    println!("  {}", "-".repeat(70));

    for function in functions {
        let (build, clean) = if function.disabled {
            ("off", "off")
        } else if !function.folder_exists {
            ("✗", "✗")
        } else {
            (yes_no(function.can_build()), yes_no(function.can_clean()))
        };
        println!(
            "  {:<18} {:<18} {:<7} {:<7} {}",
            function.name,
            function.folder,
            build,
            clean,
            function.include.join(", ")
        );
        if let Some(ref environment) = function.environment {
            println!("  {:<18} env: {}", "", environment);
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "✓" } else { "-" }
}
