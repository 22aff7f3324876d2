//! `venvboot activate` (also the bare `venvboot`).

use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};
use venvboot_env::{Bootstrapper, Shell};

/// Ensure the environment, then print the activation script on stdout.
///
/// Nothing is written to stdout on failure, so an `eval` of the output
/// leaves the session untouched.
pub fn cmd_activate(bootstrapper: &Bootstrapper, shell: Shell) -> Result<()> {
    let outcome = bootstrapper
        .ensure_and_activate()
        .context("virtual environment bootstrap failed")?;
    tracing::debug!(
        created = outcome.created,
        installed = outcome.installed,
        "bootstrap finished"
    );

    let stdout = io::stdout();
    let interactive = stdout.is_terminal();
    let mut out = stdout.lock();
    out.write_all(outcome.activation.render(shell).as_bytes())?;
    out.flush()?;

    if interactive {
        eprintln!("{}", activation_caveat(shell));
    }
    Ok(())
}

/// Shown when stdout is a terminal, i.e. nobody is evaluating the script.
fn activation_caveat(shell: Shell) -> String {
    let how = match shell {
        Shell::Posix => r#"eval "$(venvboot)""#,
        Shell::Fish => "venvboot | source",
    };
    format!(
        "venvboot: note: a program cannot change the shell that started it; run `{}` to activate the environment in this session",
        how
    )
}
