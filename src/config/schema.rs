//! Field-by-field validation of raw configuration objects.
//!
//! Each recognized key has a validator that either yields a typed value or
//! nothing. A value of the wrong type is dropped without error.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

/// A configuration object after validation and path resolution.
///
/// Every field is optional: absent means "not set by this source".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserConfig {
    pub out: Option<PathBuf>,
    pub lines: Option<u64>,
    pub include_untracked: Option<bool>,
    pub max_new_file_size_bytes: Option<u64>,
    pub max_buffer_bytes: Option<u64>,
    pub template: Option<String>,
    pub template_file: Option<PathBuf>,
    pub template_preset: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub exclude_file: Option<PathBuf>,
    pub pr_template_file: Option<PathBuf>,
    pub embed_pr_template: Option<bool>,
}

impl UserConfig {
    /// Validate a raw object, resolving relative path fields against `base`.
    ///
    /// `out` takes precedence over its legacy alias `outputFile` when both
    /// are valid.
    pub fn normalize(raw: &Map<String, Value>, base: &Path) -> Self {
        let fields = Fields { raw, base };

        Self {
            out: fields.path("out").or_else(|| fields.path("outputFile")),
            lines: fields.unsigned("lines"),
            include_untracked: fields.boolean("includeUntracked"),
            max_new_file_size_bytes: fields.unsigned("maxNewFileSizeBytes"),
            max_buffer_bytes: fields.unsigned("maxBuffer"),
            template: fields.string("template"),
            template_file: fields.path("templateFile"),
            template_preset: fields.string("templatePreset"),
            exclude: fields.string_list("exclude"),
            exclude_file: fields.path("excludeFile"),
            pr_template_file: fields.path("prTemplateFile"),
            embed_pr_template: fields.boolean("embedPrTemplate"),
        }
    }
}

struct Fields<'a> {
    raw: &'a Map<String, Value>,
    base: &'a Path,
}

impl Fields<'_> {
    /// Look up `key`, logging when it is present but rejected.
    fn checked<T>(&self, key: &str, accept: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let value = self.raw.get(key)?;
        let accepted = accept(value);
        if accepted.is_none() {
            debug!("Ignoring config field '{}': unexpected value {}", key, value);
        }
        accepted
    }

    fn string(&self, key: &str) -> Option<String> {
        self.checked(key, |v| v.as_str().map(str::to_string))
    }

    fn unsigned(&self, key: &str) -> Option<u64> {
        self.checked(key, Value::as_u64)
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        self.checked(key, Value::as_bool)
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.string(key).map(|s| resolve_path(self.base, &s))
    }

    /// Accept an array only when every element is a non-empty string.
    fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.checked(key, |v| {
            v.as_array()?
                .iter()
                .map(|item| item.as_str().filter(|s| !s.is_empty()).map(str::to_string))
                .collect()
        })
    }
}

/// Join a relative path onto `base`. Blank strings are kept verbatim so the
/// merge step can detect them.
pub fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    if raw.trim().is_empty() {
        return PathBuf::from(raw);
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
