//! Error types for diffprompt modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found in PATH. Install git and make sure it is on your PATH.")]
    NotInstalled,

    #[error("Not a git repository (or any parent directory): {0}")]
    NotARepository(String),

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Failed to read git output: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("git {args} exited with code {code}: {stderr}")]
    NonZeroExit {
        args: String,
        code: i32,
        stderr: String,
    },

    #[error("git output exceeded the {limit} byte buffer limit (raise it with --max-buffer)")]
    OutputTooLarge { limit: u64 },
}

/// Errors from diff collection.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("No changes detected (staged, unstaged, or untracked)")]
    NoChanges,

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Errors from writing the rendered prompt.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write prompt to {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move prompt into place at {path:?}: {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
