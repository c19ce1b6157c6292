//! Pull request template discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Options;

/// Locations probed under the repository root, in order.
pub const PR_TEMPLATE_CANDIDATES: [&str; 7] = [
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    ".github/PULL_REQUEST_TEMPLATE/pull_request_template.md",
    "docs/pull_request_template.md",
    "docs/PULL_REQUEST_TEMPLATE.md",
    "pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
];

/// A pull request template found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrTemplate {
    pub path: PathBuf,
    pub body: String,
}

impl PrTemplate {
    /// The block substituted for `{{prTemplateSection}}`.
    pub fn section(&self) -> String {
        format!(
            "\n## Pull Request Template\nThe repository uses this pull request template. \
Keep the PR title consistent with it.\n\n{}\n",
            self.body.trim_end()
        )
    }
}

/// Find the PR template for this run.
///
/// Returns `None` when embedding is disabled. An explicit
/// `pr_template_file` is tried first, then the conventional locations.
pub async fn find_pr_template(repo_root: &Path, options: &Options) -> Option<PrTemplate> {
    if !options.embed_pr_template {
        debug!("PR template embedding disabled");
        return None;
    }

    if let Some(explicit) = &options.pr_template_file {
        if let Some(found) = read_template(&repo_root.join(explicit)).await {
            return Some(found);
        }
    }

    for candidate in PR_TEMPLATE_CANDIDATES {
        if let Some(found) = read_template(&repo_root.join(candidate)).await {
            return Some(found);
        }
    }

    debug!("No PR template found");
    None
}

async fn read_template(path: &Path) -> Option<PrTemplate> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) if !body.trim().is_empty() => {
            debug!("Using PR template {}", path.display());
            Some(PrTemplate {
                path: path.to_path_buf(),
                body,
            })
        }
        Ok(_) => {
            debug!("Skipping empty PR template {}", path.display());
            None
        }
        Err(_) => None,
    }
}
