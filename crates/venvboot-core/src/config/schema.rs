//! Config structs grouped by concern, loaded from environment variables.

use super::env_keys::{interpreter as interp_keys, observability as obv_keys, paths as path_keys};
use super::loader::{env_bool, env_optional, env_or, lookup_optional};
use std::path::PathBuf;

/// Interpreter used to create the virtual environment.
///
/// Resolved once at startup: an explicit override (CLI flag or
/// `VENVBOOT_PYTHON` / `PYTHON`) wins, otherwise the first of `python3`,
/// `python` found on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub interpreter: PathBuf,
    /// True when the interpreter came from an override rather than discovery
    pub overridden: bool,
}

impl InterpreterConfig {
    /// Load from the environment, letting `cli_override` take precedence.
    pub fn with_override(cli_override: Option<String>) -> Self {
        super::loader::load_dotenv();
        Self::from_lookup(cli_override, |k| std::env::var(k).ok())
    }

    /// Same chain as [`Self::with_override`] against an arbitrary variable lookup.
    pub fn from_lookup<F>(cli_override: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = cli_override
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                lookup_optional(lookup, interp_keys::VENVBOOT_PYTHON, interp_keys::PYTHON_ALIASES)
            });
        Self::resolve(value)
    }

    /// Pure resolution step: an override is used verbatim.
    pub fn resolve(override_value: Option<String>) -> Self {
        match override_value {
            Some(value) => Self {
                interpreter: PathBuf::from(value),
                overridden: true,
            },
            None => Self {
                interpreter: Self::discover_default(),
                overridden: false,
            },
        }
    }

    /// First default candidate found on `PATH`; the bare name `python3` if none is.
    pub fn discover_default() -> PathBuf {
        for name in interp_keys::DEFAULT_CANDIDATES {
            if let Ok(path) = which::which(name) {
                tracing::debug!(candidate = name, path = %path.display(), "discovered interpreter");
                return path;
            }
        }
        PathBuf::from(interp_keys::DEFAULT_CANDIDATES[0])
    }
}

/// Home and project locations.
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// The user's home directory; `None` when it cannot be determined
    pub home: Option<PathBuf>,
    /// Directory holding the project's packaging metadata
    pub project_dir: PathBuf,
    /// Login shell of the caller (`$SHELL`)
    pub shell: Option<String>,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let project_dir = env_optional(path_keys::VENVBOOT_PROJECT_DIR, &[])
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        Self {
            home: dirs::home_dir().filter(|p| !p.as_os_str().is_empty()),
            project_dir,
            shell: env_optional(path_keys::SHELL, &[]),
        }
    }
}

/// Logging config: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::VENVBOOT_QUIET, &[], false),
                log_level: env_or(obv_keys::VENVBOOT_LOG_LEVEL, &[], || {
                    "venvboot=warn".to_string()
                }),
                log_json: env_bool(obv_keys::VENVBOOT_LOG_JSON, &[], false),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_used_verbatim() {
        let cfg = InterpreterConfig::resolve(Some("/opt/stub/python".to_string()));
        assert_eq!(cfg.interpreter, PathBuf::from("/opt/stub/python"));
        assert!(cfg.overridden);
    }

    #[test]
    fn test_default_is_discovered() {
        let cfg = InterpreterConfig::resolve(None);
        assert!(!cfg.overridden);
        let name = cfg
            .interpreter
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        assert!(name.starts_with("python"), "unexpected default: {}", name);
    }

    #[test]
    fn test_cli_override_beats_environment() {
        let env = |k: &str| match k {
            "VENVBOOT_PYTHON" => Some("/opt/env/python3".to_string()),
            "PYTHON" => Some("python".to_string()),
            _ => None,
        };
        let cfg = InterpreterConfig::from_lookup(Some(" /usr/bin/python3.12 ".to_string()), env);
        assert_eq!(cfg.interpreter, PathBuf::from("/usr/bin/python3.12"));
        assert!(cfg.overridden);

        let cfg = InterpreterConfig::from_lookup(None, env);
        assert_eq!(cfg.interpreter, PathBuf::from("/opt/env/python3"));
        assert!(cfg.overridden);
    }

    #[test]
    fn test_blank_cli_override_falls_back_to_alias() {
        let env = |k: &str| (k == "PYTHON").then(|| "python3.11".to_string());
        let cfg = InterpreterConfig::from_lookup(Some("   ".to_string()), env);
        assert_eq!(cfg.interpreter, PathBuf::from("python3.11"));
    }
}
