//! Environment variable keys and their aliases.
//!
//! `VENVBOOT_*` is always checked first; the aliases keep the variables the
//! old bootstrap script understood working.

/// Interpreter used to create the environment
pub mod interpreter {
    pub const VENVBOOT_PYTHON: &str = "VENVBOOT_PYTHON";
    pub const PYTHON_ALIASES: &[&str] = &["PYTHON"];

    /// Names probed on `PATH` when no override is set, in order.
    pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];
}

/// Environment location and project directory
pub mod paths {
    pub const VENVBOOT_PROJECT_DIR: &str = "VENVBOOT_PROJECT_DIR";
    pub const SHELL: &str = "SHELL";
}

/// Logging
pub mod observability {
    pub const VENVBOOT_QUIET: &str = "VENVBOOT_QUIET";
    pub const VENVBOOT_LOG_LEVEL: &str = "VENVBOOT_LOG_LEVEL";
    pub const VENVBOOT_LOG_JSON: &str = "VENVBOOT_LOG_JSON";
}
