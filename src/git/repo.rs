//! Repository discovery using git2-rs.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::GitError;

/// Find the working-tree root of the repository containing `start`.
///
/// Fails with `GitError::NotARepository` outside a repository and for bare
/// repositories.
pub fn discover_repo_root(start: &Path) -> Result<PathBuf, GitError> {
    let repo = Repository::discover(start)
        .map_err(|e| GitError::NotARepository(e.message().to_string()))?;

    // Collecting the components drops git2's trailing separator.
    repo.workdir()
        .map(|dir| dir.components().collect::<PathBuf>())
        .ok_or_else(|| GitError::NotARepository("bare repository has no working tree".into()))
}
