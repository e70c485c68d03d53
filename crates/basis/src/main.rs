use anyhow::{Context as _, Result};
use basis_exec::{ExecOptions, FAILURE_EXIT_CODE, execute, or_exit};
use basis_platform::quote;
use basis_target::{Context, RegistrySource};
use clap::Parser;
use console::{Term, style};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{App, Commands, ExecuteArg};
use crate::settings::{Overrides, Settings};

mod cli;
mod settings;

fn main() {
    let app = App::parse();

    let code = match run(app) {
        Ok(code) => code,
        Err(err) => {
            let _ = Term::stderr().write_line(&format!("{} {err:#}", style("error:").red().bold()));
            FAILURE_EXIT_CODE
        }
    };
    process::exit(code);
}

fn run(app: App) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let settings =
        Settings::load(&cwd, Overrides::from(&app)).context("failed to load settings")?;
    init_tracing(settings.verbosity);
    debug!(?settings, "settings loaded");

    let ctx = context(&settings);
    match app.cmd {
        Commands::TargetUid { name } => {
            println!("{}", ctx.target_uid(&name)?);
            Ok(0)
        }
        Commands::IsTarget { name } => Ok(if ctx.is_target(&name)? { 0 } else { 1 }),
        Commands::ExePath { name } => {
            let path = ctx
                .exe_path(name.as_deref())
                .with_context(|| describe(name.as_deref()))?;
            println!("{}", path.display());
            Ok(0)
        }
        Commands::ExeName { name } => {
            let file_name = ctx
                .exe_name(name.as_deref())
                .with_context(|| describe(name.as_deref()))?;
            println!("{file_name}");
            Ok(0)
        }
        Commands::ExeDir { name } => {
            let dir = ctx
                .exe_dir(name.as_deref())
                .with_context(|| describe(name.as_deref()))?;
            println!("{}", dir.display());
            Ok(0)
        }
        Commands::Execute(arg) => cmd_execute(&ctx, &settings, arg),
        Commands::Quote { args } => {
            println!("{}", quote::to_string(&args));
            Ok(0)
        }
        Commands::Split { line } => {
            for arg in quote::split_quoted(&line) {
                println!("{arg}");
            }
            Ok(0)
        }
    }
}

// Failures go through `or_exit` so the diagnostic matches every other caller.
fn cmd_execute(ctx: &Context, settings: &Settings, arg: ExecuteArg) -> Result<i32> {
    let (command, args) = arg
        .command
        .split_first()
        .context("missing command to execute")?;
    let options = ExecOptions::new()
        .allow_fail(arg.allow_fail)
        .simulate(arg.simulate)
        .quiet(arg.quiet)
        .verbosity(settings.verbosity);

    Ok(or_exit(execute(ctx, &options, command, args)))
}

fn context(settings: &Settings) -> Context {
    let source = match &settings.registry {
        Some(path) => RegistrySource::File(path.clone()),
        None => RegistrySource::Empty,
    };
    let ctx = Context::from_source(source);
    match &settings.namespace {
        Some(namespace) => ctx.with_namespace(namespace.as_str()),
        None => ctx,
    }
}

fn describe(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("failed to resolve `{name}`"),
        None => "failed to locate the running executable".to_owned(),
    }
}

fn init_tracing(verbosity: u8) {
    let default = if verbosity > 0 { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
