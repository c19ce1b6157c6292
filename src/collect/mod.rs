//! Diff payload collection.
//!
//! The payload is the unstaged diff, then the staged diff, then (when
//! enabled) the untracked-files section. Git failures abort collection;
//! per-file problems in the untracked section never do.

pub mod untracked;

use std::path::Path;

use tracing::info;

use crate::config::Options;
use crate::error::CollectError;
use crate::git::{GitExecutor, SystemGit, staged_diff, unstaged_diff, untracked_files};
use crate::pathspec::{ExclusionSet, build_exclusion_set};

pub use untracked::{UntrackedContent, is_binary};

/// Collect the payload for the repository at `repo_root` using the system git.
pub async fn collect(repo_root: &Path, options: &Options) -> Result<String, CollectError> {
    let git = SystemGit::new(repo_root, options.max_buffer_bytes);
    let exclusions = build_exclusion_set(repo_root, options).await;
    collect_diff(&git, repo_root, options, &exclusions).await
}

/// Collect the payload with an explicit executor and exclusion set.
///
/// Fails with `CollectError::NoChanges` when nothing remains after all
/// three queries.
pub async fn collect_diff<E: GitExecutor + ?Sized>(
    git: &E,
    repo_root: &Path,
    options: &Options,
    exclusions: &ExclusionSet,
) -> Result<String, CollectError> {
    let unstaged = unstaged_diff(git, exclusions).await?;
    let staged = staged_diff(git, exclusions).await?;

    let mut payload = [unstaged.trim(), staged.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if options.include_untracked {
        let files = exclusions.filter_paths(untracked_files(git, exclusions).await?);
        info!("Found {} untracked file(s)", files.len());

        if !files.is_empty() {
            let section = untracked::render_untracked_section(
                repo_root,
                &files,
                options.max_new_file_size_bytes,
            )
            .await;
            if !payload.is_empty() {
                payload.push_str("\n\n");
            }
            payload.push_str(&section);
        }
    }

    if payload.trim().is_empty() {
        return Err(CollectError::NoChanges);
    }

    Ok(payload)
}
