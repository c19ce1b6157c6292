//! Choosing the active template.
//!
//! Precedence, highest first: inline text, template file, named preset,
//! built-in default. Blank candidates fall through to the next level.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::presets;
use crate::config::Options;

/// Where the active template came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Inline,
    File(PathBuf),
    Preset(String),
    Default,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Inline => f.write_str("inline template"),
            TemplateSource::File(path) => write!(f, "template file {}", path.display()),
            TemplateSource::Preset(name) => write!(f, "preset '{}'", name),
            TemplateSource::Default => f.write_str("default preset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub text: String,
    pub source: TemplateSource,
}

/// Resolve the template for this run. Never fails.
pub async fn resolve_template(options: &Options, repo_root: &Path) -> ResolvedTemplate {
    let resolved = resolve_inner(options, repo_root).await;
    info!("Using {}", resolved.source);
    resolved
}

async fn resolve_inner(options: &Options, repo_root: &Path) -> ResolvedTemplate {
    if let Some(inline) = options.template.as_deref().filter(|t| !t.trim().is_empty()) {
        return ResolvedTemplate {
            text: inline.to_string(),
            source: TemplateSource::Inline,
        };
    }

    if let Some(file) = &options.template_file {
        let path = repo_root.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) if !text.trim().is_empty() => {
                return ResolvedTemplate {
                    text,
                    source: TemplateSource::File(path),
                };
            }
            Ok(_) => debug!("Template file {} is empty, falling through", path.display()),
            Err(e) => debug!("Cannot read template file {}: {}", path.display(), e),
        }
    }

    if let Some(name) = options.template_preset.as_deref() {
        match presets::lookup(name) {
            Some(text) => {
                return ResolvedTemplate {
                    text: text.to_string(),
                    source: TemplateSource::Preset(name.trim().to_ascii_lowercase()),
                };
            }
            None => debug!("Unknown preset '{}', using default", name),
        }
    }

    ResolvedTemplate {
        text: presets::default_template().to_string(),
        source: TemplateSource::Default,
    }
}
