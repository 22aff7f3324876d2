//! Tracing init.
//!
//! Uses config::ObservabilityConfig for VENVBOOT_QUIET, VENVBOOT_LOG_LEVEL and
//! VENVBOOT_LOG_JSON. Logs always go to stderr: stdout carries the activation
//! script.

use tracing_subscriber::{prelude::*, EnvFilter};
use venvboot_core::config::ObservabilityConfig;

/// Initialize tracing. Call at process startup.
/// When VENVBOOT_QUIET=1 only errors are logged. RUST_LOG wins over both.
/// The `venvboot` target prefix also covers `venvboot_env` and `venvboot_core`.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let level = filter_directive(cfg);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn filter_directive(cfg: &ObservabilityConfig) -> String {
    if cfg.quiet {
        "venvboot=error".to_string()
    } else {
        cfg.log_level.clone()
    }
}
