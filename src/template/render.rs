//! `{{key}}` placeholder substitution.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{SecondsFormat, Utc};
use regex_lite::{Captures, Regex};

use super::pr_template::PrTemplate;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("Invalid regex"));

/// Values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard bindings for one run: `diff`, `timestamp`, `repoRoot`,
    /// `prTemplate` and `prTemplateSection`.
    pub fn for_prompt(diff: &str, repo_root: &Path, pr_template: Option<&PrTemplate>) -> Self {
        let mut bindings = Self::new();
        bindings.insert("diff", diff);
        bindings.insert(
            "timestamp",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        bindings.insert("repoRoot", repo_root.display().to_string());
        bindings.insert(
            "prTemplate",
            pr_template.map(|t| t.body.clone()).unwrap_or_default(),
        );
        bindings.insert(
            "prTemplateSection",
            pr_template.map(PrTemplate::section).unwrap_or_default(),
        );
        bindings
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Replace every `{{ key }}` in `template` in a single pass.
///
/// Unknown keys become the empty string. Substituted values are not
/// scanned again.
pub fn render(template: &str, bindings: &Bindings) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            bindings.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}
