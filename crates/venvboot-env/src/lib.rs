//! Per-user virtual environment bootstrapper.
//!
//! Check existence → create if missing → install the project in editable
//! mode → hand back an [`Activation`] the caller applies to its own shell.
//! Nothing here mutates the caller's session directly; the CLI renders the
//! activation as a script for `eval`.

pub mod activation;
pub mod builder;
pub mod error;
pub mod layout;
pub mod lock;
pub mod progress;

pub use activation::{Activation, Shell};
pub use builder::{BootstrapOutcome, Bootstrapper, EnvStatus};
pub use error::BootstrapError;
pub use layout::EnvLayout;
pub use progress::{Progress, StderrProgress};
