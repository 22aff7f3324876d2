//! Activation descriptor.
//!
//! A child process cannot change its parent's environment, so activation is
//! data: the variables to set and unset plus the entry point to source. The
//! bootstrapper applies it to its own child commands; the caller's shell
//! applies the rendered script via `eval`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use crate::error::BootstrapError;
use crate::layout::EnvLayout;

/// Variables a stale interpreter setup may leave behind.
const UNSET_VARS: &[&str] = &["PYTHONHOME"];

/// Shell dialect for the rendered activation script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// sh, bash, zsh, dash, ksh
    Posix,
    Fish,
}

impl Shell {
    /// Pick a dialect from a `$SHELL` value; anything unrecognized is POSIX.
    pub fn detect(shell_var: Option<&str>) -> Self {
        let name = shell_var
            .map(Path::new)
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if name == "fish" {
            Shell::Fish
        } else {
            Shell::Posix
        }
    }
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posix" | "sh" | "bash" | "zsh" | "dash" | "ksh" => Ok(Shell::Posix),
            "fish" => Ok(Shell::Fish),
            other => Err(format!("unsupported shell '{}' (expected posix or fish)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub env_dir: PathBuf,
    pub entry_point: PathBuf,
    pub bin_dir: PathBuf,
    /// `VIRTUAL_ENV` and `PATH` (with `bin_dir` prepended)
    pub set_vars: Vec<(String, OsString)>,
    pub unset_vars: Vec<String>,
}

impl Activation {
    /// Locate the entry point and build the descriptor against `current_path`.
    pub fn locate(layout: &EnvLayout, current_path: Option<OsString>) -> Result<Self, BootstrapError> {
        if !layout.has_entry_point() {
            return Err(BootstrapError::ActivationNotFound {
                path: layout.dir().to_path_buf(),
            });
        }
        let bin_dir = layout.bin_dir();
        let path_value = prepend_path(&bin_dir, current_path)?;
        Ok(Self {
            env_dir: layout.dir().to_path_buf(),
            entry_point: layout.entry_point(),
            bin_dir,
            set_vars: vec![
                ("VIRTUAL_ENV".to_string(), layout.dir().as_os_str().to_os_string()),
                ("PATH".to_string(), path_value),
            ],
            unset_vars: UNSET_VARS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Same as [`Activation::locate`] against this process's `PATH`.
    pub fn locate_from_env(layout: &EnvLayout) -> Result<Self, BootstrapError> {
        Self::locate(layout, std::env::var_os("PATH"))
    }

    /// Make `cmd` resolve to the environment's interpreter and packages.
    pub fn apply_to(&self, cmd: &mut Command) {
        for (key, value) in &self.set_vars {
            cmd.env(key, value);
        }
        for key in &self.unset_vars {
            cmd.env_remove(key);
        }
    }

    /// Script the caller's shell evaluates to activate the environment.
    pub fn render(&self, shell: Shell) -> String {
        match shell {
            Shell::Posix => format!(". {}\n", sh_quote(&self.entry_point.to_string_lossy())),
            Shell::Fish => {
                let fish_entry = self.bin_dir.join("activate.fish");
                if fish_entry.is_file() {
                    return format!("source {}\n", fish_quote(&fish_entry.to_string_lossy()));
                }
                let mut script = format!(
                    "set -gx VIRTUAL_ENV {}\nset -gx PATH {} $PATH\n",
                    fish_quote(&self.env_dir.to_string_lossy()),
                    fish_quote(&self.bin_dir.to_string_lossy()),
                );
                for key in &self.unset_vars {
                    script.push_str(&format!("set -e {}\n", key));
                }
                script
            }
        }
    }
}

fn prepend_path(bin_dir: &Path, current: Option<OsString>) -> Result<OsString, BootstrapError> {
    let mut entries = vec![bin_dir.to_path_buf()];
    if let Some(current) = current {
        entries.extend(std::env::split_paths(&current).filter(|p| p != bin_dir));
    }
    std::env::join_paths(entries).map_err(|e| {
        BootstrapError::io(
            format!("cannot add {} to PATH", bin_dir.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        )
    })
}

fn sh_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn fish_quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', r"\\").replace('\'', r"\'"))
}
