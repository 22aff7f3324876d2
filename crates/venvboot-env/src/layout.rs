//! Where the environment lives and what is inside it.

use std::path::{Path, PathBuf};

use venvboot_core::config::PathsConfig;

use crate::error::BootstrapError;

/// Project the environment is named after.
pub const PROJECT_NAME: &str = "synthpops";

/// Per-user directory holding named environments, relative to home.
pub const ENVS_DIR: &str = ".virtualenvs";

#[cfg(windows)]
const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

#[cfg(windows)]
const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
const PYTHON_EXE: &str = "python";

/// Fixed, user-scoped location of the environment: `<home>/.virtualenvs/synthpops`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLayout {
    dir: PathBuf,
}

impl EnvLayout {
    pub fn for_home(home: &Path) -> Self {
        Self {
            dir: home.join(ENVS_DIR).join(PROJECT_NAME),
        }
    }

    pub fn from_paths(paths: &PathsConfig) -> Result<Self, BootstrapError> {
        paths
            .home
            .as_deref()
            .map(Self::for_home)
            .ok_or(BootstrapError::HomeNotFound)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sole gate for creation: contents are never inspected.
    pub fn exists(&self) -> bool {
        self.dir.exists()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join(BIN_DIR)
    }

    /// The activation entry point (`bin/activate`).
    pub fn entry_point(&self) -> PathBuf {
        self.bin_dir().join("activate")
    }

    pub fn has_entry_point(&self) -> bool {
        self.entry_point().is_file()
    }

    /// Interpreter inside the environment.
    pub fn python(&self) -> PathBuf {
        self.bin_dir().join(PYTHON_EXE)
    }

    /// Lock serializing first-time creation; sits next to the environment, not in it.
    pub fn lock_path(&self) -> PathBuf {
        let parent = self.dir.parent().unwrap_or_else(|| Path::new("."));
        let name = self
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| PROJECT_NAME.to_string());
        parent.join(format!(".{}.lock", name))
    }
}
