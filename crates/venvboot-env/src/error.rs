use std::path::PathBuf;
use thiserror::Error;

/// Every way a bootstrap can fail. All of them end the invocation.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("cannot determine the home directory")]
    HomeNotFound,

    #[error(
        "could not create virtual environment {} with {}: {} (check output above)",
        .path.display(),
        .interpreter.display(),
        .detail
    )]
    CreationFailure {
        interpreter: PathBuf,
        path: PathBuf,
        detail: String,
    },

    #[error("installation problem: {} was created but has no activation script", .path.display())]
    PostCreationIntegrity { path: PathBuf },

    #[error("virtual environment not found: {}", .path.display())]
    ActivationNotFound { path: PathBuf },

    #[error("no pyproject.toml, setup.py or setup.cfg in {}", .dir.display())]
    MissingProjectMetadata { dir: PathBuf },

    #[error("{step} failed: {detail} (run `venvboot install` to retry)")]
    InstallFailure { step: &'static str, detail: String },

    #[error("failed to lock {}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl BootstrapError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
