//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use diffprompt::error::GitError;
use diffprompt::git::GitExecutor;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root, creating parent directories.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Add a file to the index.
    pub fn stage(&self, rel: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(rel)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write, stage and commit files. Returns the commit OID.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> Oid {
        for (rel, content) in files {
            self.write(rel, content);
            self.stage(rel);
        }

        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }
}

/// Executor replaying canned stdout, one response per call, and recording
/// the arguments it was called with.
#[derive(Default)]
pub struct ScriptedGit {
    responses: Mutex<VecDeque<Result<String, GitError>>>,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGit {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<String, GitError>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Stdout for the unstaged diff, staged diff and untracked listing, in order.
    pub fn with_output(unstaged: &str, staged: &str, untracked: &str) -> Self {
        Self::new([
            Ok(unstaged.to_string()),
            Ok(staged.to_string()),
            Ok(untracked.to_string()),
        ])
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitExecutor for ScriptedGit {
    async fn run(&self, args: &[String]) -> Result<String, GitError> {
        self.calls.lock().unwrap().push(args.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected git call: {:?}", args))
    }
}
