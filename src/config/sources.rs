//! Configuration source discovery.
//!
//! Candidates are tried in order and the first one that yields a config
//! object wins:
//!
//! 1. The file named by `DIFFPROMPT_CONFIG`
//! 2. `diffprompt.config.json` at the repository root
//! 3. `.diffpromptrc` at the repository root
//! 4. The `"diffprompt"` field of `package.json`
//! 5. The `[package.metadata.diffprompt]` table of `Cargo.toml`
//!
//! A missing, unreadable or unparsable candidate is skipped.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use super::env::Environment;

pub const PRIMARY_CONFIG_FILE: &str = "diffprompt.config.json";
pub const RC_CONFIG_FILE: &str = ".diffpromptrc";
pub const MANIFEST_KEY: &str = "diffprompt";

/// Where a configuration object came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvPath(PathBuf),
    ConfigFile(PathBuf),
    RcFile(PathBuf),
    PackageJson(PathBuf),
    CargoMetadata(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::EnvPath(p)
            | ConfigSource::ConfigFile(p)
            | ConfigSource::RcFile(p)
            | ConfigSource::PackageJson(p)
            | ConfigSource::CargoMetadata(p) => p,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::EnvPath(p) => write!(f, "{} (from environment)", p.display()),
            ConfigSource::ConfigFile(p) | ConfigSource::RcFile(p) => write!(f, "{}", p.display()),
            ConfigSource::PackageJson(p) => {
                write!(f, "{} (\"{}\" field)", p.display(), MANIFEST_KEY)
            }
            ConfigSource::CargoMetadata(p) => {
                write!(f, "{} ([package.metadata.{}])", p.display(), MANIFEST_KEY)
            }
        }
    }
}

/// A raw configuration object and the source it was read from.
#[derive(Debug, Clone)]
pub struct RawConfig {
    pub source: ConfigSource,
    pub fields: Map<String, Value>,
}

/// Find the first usable configuration source.
///
/// `root` is the repository root (or the working directory when there is
/// none); a relative `DIFFPROMPT_CONFIG` path is resolved against `cwd`.
pub fn discover(root: &Path, cwd: &Path, env: &Environment) -> Option<RawConfig> {
    candidates(root, cwd, env)
        .into_iter()
        .find_map(|source| match load(&source) {
            Some(fields) => {
                debug!("Using config from {}", source);
                Some(RawConfig { source, fields })
            }
            None => {
                debug!("No usable config at {}", source);
                None
            }
        })
}

fn candidates(root: &Path, cwd: &Path, env: &Environment) -> Vec<ConfigSource> {
    let mut sources = Vec::with_capacity(5);
    if let Some(path) = env.config_path() {
        let path = Path::new(path);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        sources.push(ConfigSource::EnvPath(path));
    }
    sources.push(ConfigSource::ConfigFile(root.join(PRIMARY_CONFIG_FILE)));
    sources.push(ConfigSource::RcFile(root.join(RC_CONFIG_FILE)));
    sources.push(ConfigSource::PackageJson(root.join("package.json")));
    sources.push(ConfigSource::CargoMetadata(root.join("Cargo.toml")));
    sources
}

fn load(source: &ConfigSource) -> Option<Map<String, Value>> {
    let content = std::fs::read_to_string(source.path()).ok()?;

    match source {
        ConfigSource::EnvPath(path) if is_toml(path) => parse_toml_object(&content),
        ConfigSource::EnvPath(_) | ConfigSource::ConfigFile(_) | ConfigSource::RcFile(_) => {
            parse_json_object(&content)
        }
        ConfigSource::PackageJson(_) => {
            let json: Value = serde_json::from_str(&content).ok()?;
            json.get(MANIFEST_KEY)?.as_object().cloned()
        }
        ConfigSource::CargoMetadata(_) => {
            let doc = content.parse::<toml_edit::DocumentMut>().ok()?;
            let table = doc
                .get("package")
                .and_then(|p| p.get("metadata"))
                .and_then(|m| m.get(MANIFEST_KEY))?;
            match item_to_json(table)? {
                Value::Object(map) => Some(map),
                _ => None,
            }
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

fn parse_json_object(content: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(content).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn parse_toml_object(content: &str) -> Option<Map<String, Value>> {
    let doc = content.parse::<toml_edit::DocumentMut>().ok()?;
    Some(table_to_json(doc.as_table()))
}

// --- TOML to JSON conversion ---
//
// The schema validators work on `serde_json::Value`, so TOML sources are
// converted first. Datetimes become strings.

fn item_to_json(item: &toml_edit::Item) -> Option<Value> {
    if let Some(value) = item.as_value() {
        return Some(value_to_json(value));
    }
    if let Some(table) = item.as_table() {
        return Some(Value::Object(table_to_json(table)));
    }
    item.as_array_of_tables()
        .map(|tables| Value::Array(tables.iter().map(|t| Value::Object(table_to_json(t))).collect()))
}

fn table_to_json(table: &toml_edit::Table) -> Map<String, Value> {
    table
        .iter()
        .filter_map(|(key, item)| item_to_json(item).map(|v| (key.to_string(), v)))
        .collect()
}

fn value_to_json(value: &toml_edit::Value) -> Value {
    if let Some(s) = value.as_str() {
        Value::String(s.to_string())
    } else if let Some(i) = value.as_integer() {
        Value::from(i)
    } else if let Some(f) = value.as_float() {
        serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
    } else if let Some(b) = value.as_bool() {
        Value::Bool(b)
    } else if let Some(d) = value.as_datetime() {
        Value::String(d.to_string())
    } else if let Some(array) = value.as_array() {
        Value::Array(array.iter().map(value_to_json).collect())
    } else if let Some(table) = value.as_inline_table() {
        Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect(),
        )
    } else {
        Value::Null
    }
}
