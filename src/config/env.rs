//! Environment values consumed by the config resolver.
//!
//! The resolver never reads process state itself; `main` snapshots the
//! environment once and passes it in.

use std::collections::HashMap;

use tracing::warn;

/// Environment variable overriding the default preview line count.
pub const PREVIEW_LINES_ENV_VAR: &str = "DIFFPROMPT_PREVIEW_LINES";

/// Environment variable naming a config file that takes top discovery priority.
pub const CONFIG_PATH_ENV_VAR: &str = "DIFFPROMPT_CONFIG";

/// Snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Preview line count from `DIFFPROMPT_PREVIEW_LINES`.
    ///
    /// Logs a warning and returns `None` if the variable is set but is not
    /// a non-negative integer.
    pub fn preview_lines(&self) -> Option<u64> {
        match self.get(PREVIEW_LINES_ENV_VAR) {
            Some(v) if !v.trim().is_empty() => match v.trim().parse::<u64>() {
                Ok(lines) => Some(lines),
                Err(_) => {
                    warn!(
                        "Invalid {} value '{}', using built-in default",
                        PREVIEW_LINES_ENV_VAR, v
                    );
                    None
                }
            },
            _ => None,
        }
    }

    /// Config file path from `DIFFPROMPT_CONFIG`, if set and non-blank.
    pub fn config_path(&self) -> Option<&str> {
        self.get(CONFIG_PATH_ENV_VAR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
