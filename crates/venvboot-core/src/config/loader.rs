//! Environment variable loading.
//!
//! Keeps the primary → alias → default fallback chain in one place so callers
//! never repeat `or_else` ladders.

use std::env;

/// Load `.env` from the current directory into the process environment.
///
/// Runs at most once per process and never overrides a variable that is
/// already set.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        let Ok(content) = std::fs::read_to_string(&path) else {
            return;
        };
        for (key, value) in parse_dotenv(&content) {
            if env::var(&key).is_err() {
                tracing::debug!(key = %key, "loaded from .env");
                env::set_var(&key, &value);
            }
        }
    });
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped,
/// surrounding quotes are stripped, and an unquoted trailing `# ...` is dropped.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            pairs.push((key.to_string(), value.to_string()));
        }
    }
    pairs
}

/// Resolve `primary`, then each alias, through `lookup`. Blank values count as unset.
pub fn lookup_optional<F>(lookup: F, primary: &str, aliases: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    std::iter::once(primary)
        .chain(aliases.iter().copied())
        .filter_map(|key| lookup(key))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

/// Read from the primary variable or its alias chain, falling back to `default`.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env_optional(primary, aliases).unwrap_or_else(default)
}

/// Read from the primary variable or its alias chain; empty values are `None`.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    lookup_optional(|k| env::var(k).ok(), primary, aliases)
}

/// Boolean variable: `0`/`false`/`no`/`off` are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    match env_optional(primary, aliases) {
        Some(s) => parse_bool(&s),
        None => default,
    }
}

fn parse_bool(s: &str) -> bool {
    !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(vars: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |k: &str| vars.get(k).map(|v| v.to_string())
    }

    #[test]
    fn test_primary_wins_over_alias() {
        let vars = HashMap::from([("VENVBOOT_PYTHON", "/opt/py/bin/python3"), ("PYTHON", "python")]);
        let got = lookup_optional(lookup_in(&vars), "VENVBOOT_PYTHON", &["PYTHON"]);
        assert_eq!(got.as_deref(), Some("/opt/py/bin/python3"));
    }

    #[test]
    fn test_blank_primary_falls_through_to_alias() {
        let vars = HashMap::from([("VENVBOOT_PYTHON", "  "), ("PYTHON", "python3.11")]);
        let got = lookup_optional(lookup_in(&vars), "VENVBOOT_PYTHON", &["PYTHON"]);
        assert_eq!(got.as_deref(), Some("python3.11"));
    }

    #[test]
    fn test_nothing_set() {
        let vars = HashMap::new();
        assert_eq!(lookup_optional(lookup_in(&vars), "VENVBOOT_PYTHON", &["PYTHON"]), None);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(" Off "));
    }

    #[test]
    fn test_parse_dotenv() {
        let content = r#"
# interpreter
VENVBOOT_PYTHON="/usr/local/bin/python3.12"
export VENVBOOT_QUIET=1 # keep it down
PYTHON='python3'
not a pair
"#;
        let pairs = parse_dotenv(content);
        assert_eq!(
            pairs,
            vec![
                ("VENVBOOT_PYTHON".to_string(), "/usr/local/bin/python3.12".to_string()),
                ("VENVBOOT_QUIET".to_string(), "1".to_string()),
                ("PYTHON".to_string(), "python3".to_string()),
            ]
        );
    }
}
