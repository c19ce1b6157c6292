//! The three git queries the diff collector needs.
//!
//! All of them honour the same exclusion set through git pathspecs.

use crate::error::GitError;
use crate::pathspec::ExclusionSet;

use super::executor::GitExecutor;

/// `git diff`: working tree changes not yet staged.
pub async fn unstaged_diff<E: GitExecutor + ?Sized>(
    git: &E,
    exclusions: &ExclusionSet,
) -> Result<String, GitError> {
    git.run(&with_pathspecs(&["diff", "--no-color"], exclusions))
        .await
}

/// `git diff --cached`: changes staged for commit.
pub async fn staged_diff<E: GitExecutor + ?Sized>(
    git: &E,
    exclusions: &ExclusionSet,
) -> Result<String, GitError> {
    git.run(&with_pathspecs(&["diff", "--cached", "--no-color"], exclusions))
        .await
}

/// Untracked, non-ignored files in the order git lists them.
pub async fn untracked_files<E: GitExecutor + ?Sized>(
    git: &E,
    exclusions: &ExclusionSet,
) -> Result<Vec<String>, GitError> {
    let output = git
        .run(&with_pathspecs(
            &["ls-files", "--others", "--exclude-standard", "-z"],
            exclusions,
        ))
        .await?;

    Ok(output
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect())
}

/// Append `-- <pathspecs>` when there is anything to exclude.
pub fn with_pathspecs(base: &[&str], exclusions: &ExclusionSet) -> Vec<String> {
    let mut args: Vec<String> = base.iter().map(|s| s.to_string()).collect();
    let pathspecs = exclusions.git_pathspecs();
    if !pathspecs.is_empty() {
        args.push("--".to_string());
        args.extend(pathspecs);
    }
    args
}
