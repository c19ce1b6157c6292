//! Template resolution and rendering.

pub mod pr_template;
pub mod presets;
pub mod render;
pub mod resolve;

use std::path::Path;

use crate::config::Options;

pub use pr_template::{PrTemplate, find_pr_template};
pub use render::{Bindings, render};
pub use resolve::{ResolvedTemplate, TemplateSource, resolve_template};

/// Resolve the active template and render it over `diff`.
pub async fn build_prompt(diff: &str, repo_root: &Path, options: &Options) -> String {
    let template = resolve_template(options, repo_root).await;
    let pr_template = find_pr_template(repo_root, options).await;
    let bindings = Bindings::for_prompt(diff, repo_root, pr_template.as_ref());
    render(&template.text, &bindings)
}
