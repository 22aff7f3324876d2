//! Exclusive advisory lock serializing first-time creation.
//!
//! Two sessions bootstrapping at once would both see "absent" and race the
//! interpreter. The slow path takes this lock, then re-checks existence. The
//! fast path (environment already there) never touches it.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs4::FileExt;

use crate::error::BootstrapError;

/// Held for as long as the value lives; released when the file is closed.
#[derive(Debug)]
pub struct CreationLock {
    _file: File,
    path: PathBuf,
}

impl CreationLock {
    /// Block until the lock at `path` is ours. Creates parent directories.
    pub fn acquire(path: &Path) -> Result<Self, BootstrapError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BootstrapError::io(format!("failed to create {}", parent.display()), e)
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|source| BootstrapError::Lock {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(lock = %path.display(), "waiting for creation lock");
        file.lock_exclusive().map_err(|source| BootstrapError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            _file: file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
