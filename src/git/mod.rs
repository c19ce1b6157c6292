//! Git access: repository discovery via git2-rs, queries via the git binary.

pub mod executor;
pub mod queries;
pub mod repo;

pub use executor::{GitExecutor, SystemGit, check_git_installed};
pub use queries::{staged_diff, unstaged_diff, untracked_files};
pub use repo::discover_repo_root;
