use clap::{Parser, Subcommand};
use std::path::PathBuf;
use venvboot_env::Shell;

/// venvboot - create, install into and activate the synthpops virtual environment
///
/// Activation is printed on stdout; evaluate it in your shell:
/// `eval "$(venvboot)"` (fish: `venvboot | source`).
#[derive(Parser, Debug)]
#[command(name = "venvboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Interpreter used to create the environment (default: $VENVBOOT_PYTHON, $PYTHON, then python3/python on PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<String>,

    /// Project installed in editable mode (default: $VENVBOOT_PROJECT_DIR or the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the environment if missing, then print the activation script (default)
    Activate {
        /// Shell dialect of the script: posix or fish (default: from $SHELL)
        #[arg(long, value_name = "SHELL")]
        shell: Option<Shell>,
    },

    /// Re-install the project into the existing environment
    Install,

    /// Show where the environment is and whether it is usable
    Status,

    /// Print the environment directory
    Path,

    /// Delete the environment directory
    Remove {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl Cli {
    /// The subcommand, with a bare `venvboot` meaning `activate`.
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Activate { shell: None })
    }
}
