//! `install`, `status`, `path` and `remove`.

use anyhow::{Context, Result};
use venvboot_core::config::InterpreterConfig;
use venvboot_env::{Bootstrapper, EnvStatus};

pub fn cmd_install(bootstrapper: &Bootstrapper) -> Result<()> {
    bootstrapper.install().context("re-install failed")?;
    eprintln!(
        "venvboot: installed into {}",
        bootstrapper.layout().dir().display()
    );
    Ok(())
}

pub fn cmd_status(bootstrapper: &Bootstrapper) -> Result<()> {
    println!(
        "{}",
        format_status(&bootstrapper.status(), bootstrapper.interpreter())
    );
    Ok(())
}

pub fn cmd_path(bootstrapper: &Bootstrapper) -> Result<()> {
    println!("{}", bootstrapper.layout().dir().display());
    Ok(())
}

/// `venvboot remove`: asks first unless `force`.
pub fn cmd_remove(bootstrapper: &Bootstrapper, force: bool) -> Result<()> {
    let dir = bootstrapper.layout().dir();
    if dir.exists() && !force {
        eprint!("Remove virtual environment {}? [y/N] ", dir.display());
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            eprintln!("venvboot: cancelled");
            return Ok(());
        }
    }
    bootstrapper.remove().context("remove failed")?;
    Ok(())
}

fn format_status(status: &EnvStatus, interpreter: &InterpreterConfig) -> String {
    let python = status
        .python
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let source = if interpreter.overridden {
        " (override)"
    } else {
        ""
    };
    [
        format!("environment:       {}", status.dir.display()),
        format!("exists:            {}", if status.exists { "yes" } else { "no" }),
        format!(
            "activation script: {}",
            if status.entry_point_present {
                "present"
            } else {
                "missing"
            }
        ),
        format!("python:            {}", python),
        format!(
            "creates with:      {}{}",
            interpreter.interpreter.display(),
            source
        ),
    ]
    .join("\n")
}
