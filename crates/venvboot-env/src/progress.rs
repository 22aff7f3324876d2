//! Human-readable progress lines.
//!
//! stdout is reserved for the activation script the caller evaluates, so
//! progress always goes to stderr.

/// Sink for one-line progress messages.
pub trait Progress {
    fn step(&self, message: &str);
}

/// Writes `venvboot: <message>` to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrProgress;

impl Progress for StderrProgress {
    fn step(&self, message: &str) {
        eprintln!("venvboot: {}", message);
    }
}
