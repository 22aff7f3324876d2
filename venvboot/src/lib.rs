//! venvboot CLI library: argument parsing and dispatch.

mod cli;
mod commands;
mod observability;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use venvboot_core::config::{InterpreterConfig, PathsConfig};
use venvboot_env::{Bootstrapper, EnvLayout, Shell};

/// Run the CLI — parses args and dispatches to command handlers.
pub fn run_cli() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();
    let command = cli.command_or_default();

    let paths = PathsConfig::from_env();
    let layout = EnvLayout::from_paths(&paths)?;
    let project_dir = cli.project_dir.unwrap_or_else(|| paths.project_dir.clone());
    let project_dir = std::path::absolute(&project_dir)
        .with_context(|| format!("invalid project directory {}", project_dir.display()))?;
    let interpreter = InterpreterConfig::with_override(cli.python);
    tracing::debug!(
        env = %layout.dir().display(),
        project = %project_dir.display(),
        interpreter = %interpreter.interpreter.display(),
        "configuration resolved"
    );
    let bootstrapper = Bootstrapper::new(layout, interpreter, project_dir);

    match command {
        Commands::Activate { shell } => {
            let shell = shell.unwrap_or_else(|| Shell::detect(paths.shell.as_deref()));
            commands::activate::cmd_activate(&bootstrapper, shell)
        }
        Commands::Install => commands::manage::cmd_install(&bootstrapper),
        Commands::Status => commands::manage::cmd_status(&bootstrapper),
        Commands::Path => commands::manage::cmd_path(&bootstrapper),
        Commands::Remove { force } => commands::manage::cmd_remove(&bootstrapper, force),
    }
}
