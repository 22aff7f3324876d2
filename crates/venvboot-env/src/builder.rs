//! Ensure the environment exists, install the project into it, activate it.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};
use venvboot_core::config::InterpreterConfig;

use crate::activation::Activation;
use crate::error::BootstrapError;
use crate::layout::EnvLayout;
use crate::lock::CreationLock;
use crate::progress::{Progress, StderrProgress};

/// Installed before the project so its build backend can produce wheels.
pub const PACKAGING_HELPER: &str = "wheel";

/// Any of these marks a directory as an installable project.
const PROJECT_METADATA: &[&str] = &["pyproject.toml", "setup.py", "setup.cfg"];

/// Result of [`Bootstrapper::ensure_and_activate`].
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    /// This invocation created the environment
    pub created: bool,
    /// This invocation ran the editable install
    pub installed: bool,
    pub activation: Activation,
}

/// Side-effect-free snapshot of the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvStatus {
    pub dir: PathBuf,
    pub exists: bool,
    pub entry_point_present: bool,
    /// Interpreter inside the environment, when present
    pub python: Option<PathBuf>,
}

pub struct Bootstrapper {
    layout: EnvLayout,
    interpreter: InterpreterConfig,
    project_dir: PathBuf,
    progress: Box<dyn Progress>,
}

impl Bootstrapper {
    pub fn new(layout: EnvLayout, interpreter: InterpreterConfig, project_dir: PathBuf) -> Self {
        Self {
            layout,
            interpreter,
            project_dir,
            progress: Box::new(StderrProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn layout(&self) -> &EnvLayout {
        &self.layout
    }

    pub fn interpreter(&self) -> &InterpreterConfig {
        &self.interpreter
    }

    /// Create the environment if its directory is absent, then activate it.
    ///
    /// An existing directory skips creation and install entirely, whatever
    /// it contains; only activation runs.
    pub fn ensure_and_activate(&self) -> Result<BootstrapOutcome, BootstrapError> {
        let mut created = false;
        let mut installed = false;

        if !self.layout.exists() {
            let lock = CreationLock::acquire(&self.layout.lock_path())?;
            if self.layout.exists() {
                debug!(lock = %lock.path().display(), "environment appeared while waiting for lock");
            } else {
                self.create()?;
                created = true;
                let activation = Activation::locate_from_env(&self.layout)?;
                self.install_into(&activation)?;
                installed = true;
            }
        }

        let activation = Activation::locate_from_env(&self.layout)?;
        info!(env = %self.layout.dir().display(), created, "environment activated");
        self.progress.step(&format!(
            "activated virtual environment {}",
            self.layout.dir().display()
        ));
        Ok(BootstrapOutcome {
            created,
            installed,
            activation,
        })
    }

    /// Re-run the editable install into an existing environment.
    pub fn install(&self) -> Result<(), BootstrapError> {
        let activation = Activation::locate_from_env(&self.layout)?;
        self.install_into(&activation)
    }

    pub fn status(&self) -> EnvStatus {
        let python = self.layout.python();
        EnvStatus {
            dir: self.layout.dir().to_path_buf(),
            exists: self.layout.exists(),
            entry_point_present: self.layout.has_entry_point(),
            python: python.exists().then_some(python),
        }
    }

    /// Delete the environment. Returns whether there was anything to delete.
    pub fn remove(&self) -> Result<bool, BootstrapError> {
        if !self.layout.exists() {
            self.progress.step(&format!(
                "no virtual environment at {}",
                self.layout.dir().display()
            ));
            return Ok(false);
        }
        let _lock = CreationLock::acquire(&self.layout.lock_path())?;
        std::fs::remove_dir_all(self.layout.dir()).map_err(|e| {
            BootstrapError::io(format!("failed to remove {}", self.layout.dir().display()), e)
        })?;
        info!(env = %self.layout.dir().display(), "environment removed");
        self.progress.step(&format!(
            "removed virtual environment {}",
            self.layout.dir().display()
        ));
        Ok(true)
    }

    fn create(&self) -> Result<(), BootstrapError> {
        check_project_metadata(&self.project_dir)?;

        let dir = self.layout.dir();
        let interpreter = &self.interpreter.interpreter;
        self.progress.step(&format!(
            "creating virtual environment {} with {}",
            dir.display(),
            interpreter.display()
        ));

        let mut cmd = Command::new(interpreter);
        cmd.arg("-m").arg("venv").arg(dir);
        if let Err(detail) = run_checked(&mut cmd) {
            self.cleanup_partial();
            return Err(BootstrapError::CreationFailure {
                interpreter: interpreter.clone(),
                path: dir.to_path_buf(),
                detail,
            });
        }

        if !self.layout.has_entry_point() {
            return Err(BootstrapError::PostCreationIntegrity {
                path: dir.to_path_buf(),
            });
        }
        info!(env = %dir.display(), interpreter = %interpreter.display(), "environment created");
        Ok(())
    }

    fn cleanup_partial(&self) {
        let dir = self.layout.dir();
        if !dir.exists() {
            return;
        }
        match std::fs::remove_dir_all(dir) {
            Ok(()) => debug!(env = %dir.display(), "removed partial environment"),
            Err(e) => warn!(env = %dir.display(), error = %e, "could not remove partial environment"),
        }
    }

    fn install_into(&self, activation: &Activation) -> Result<(), BootstrapError> {
        check_project_metadata(&self.project_dir)?;
        let python = self.layout.python();

        self.progress.step(&format!("installing {}", PACKAGING_HELPER));
        let mut helper = Command::new(&python);
        helper.args(["-m", "pip", "install", PACKAGING_HELPER]);
        activation.apply_to(&mut helper);
        run_checked(&mut helper).map_err(|detail| BootstrapError::InstallFailure {
            step: "packaging helper install",
            detail,
        })?;

        self.progress.step(&format!(
            "installing {} in editable mode",
            self.project_dir.display()
        ));
        let mut editable = Command::new(&python);
        editable
            .args(["-m", "pip", "install", "-e"])
            .arg(&self.project_dir);
        activation.apply_to(&mut editable);
        run_checked(&mut editable).map_err(|detail| BootstrapError::InstallFailure {
            step: "editable install",
            detail,
        })?;

        info!(project = %self.project_dir.display(), "project installed in editable mode");
        Ok(())
    }
}

fn check_project_metadata(project_dir: &Path) -> Result<(), BootstrapError> {
    if PROJECT_METADATA
        .iter()
        .any(|name| project_dir.join(name).is_file())
    {
        Ok(())
    } else {
        Err(BootstrapError::MissingProjectMetadata {
            dir: project_dir.to_path_buf(),
        })
    }
}

/// Run to completion. Child stdout is sent to our stderr so it never lands in
/// the activation script on stdout.
fn run_checked(cmd: &mut Command) -> Result<(), String> {
    let program = cmd.get_program().to_string_lossy().to_string();
    debug!(command = ?cmd, "running");
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::from(io::stderr()))
        .status()
        .map_err(|e| format!("could not run {}: {}", program, e))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{} exited with {}", program, status))
    }
}
