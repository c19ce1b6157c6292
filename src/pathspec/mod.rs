//! Exclusion patterns shared by the diff queries and the untracked listing.

pub mod pattern;

use std::path::Path;

use tracing::debug;

use crate::config::Options;

pub use pattern::Pattern;

/// The de-duplicated set of exclude patterns for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionSet {
    patterns: Vec<Pattern>,
}

impl ExclusionSet {
    /// Compile patterns, skipping blanks and duplicates.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for raw in patterns {
            if let Some(pattern) = Pattern::parse(raw.as_ref()) {
                if !set.patterns.contains(&pattern) {
                    set.patterns.push(pattern);
                }
            }
        }
        set
    }

    /// Exclude one exact repository-relative path, taken literally.
    pub fn exclude_path(&mut self, path: &str) {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return;
        }
        let pattern = Pattern::Prefix(path.to_string());
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// Drop excluded paths, keeping the input order.
    pub fn filter_paths(&self, paths: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return paths;
        }
        paths
            .into_iter()
            .filter(|path| {
                let excluded = self.is_excluded(path);
                if excluded {
                    debug!("Excluding {}", path);
                }
                !excluded
            })
            .collect()
    }

    /// Pathspec arguments restricting a git query to non-excluded paths.
    ///
    /// Empty when there is nothing to exclude. Each pattern is a single
    /// argument, so patterns containing spaces are never split.
    pub fn git_pathspecs(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        std::iter::once(".".to_string())
            .chain(self.patterns.iter().flat_map(Pattern::to_git_pathspecs))
            .collect()
    }
}

/// Build the exclusion set from `options.exclude` and `options.exclude_file`.
///
/// A relative exclude-file path is resolved against `repo_root`. An
/// unreadable exclude-file contributes no patterns. The output file is
/// always excluded when it lives inside the repository, so a previous
/// prompt never feeds into the next one.
pub async fn build_exclusion_set(repo_root: &Path, options: &Options) -> ExclusionSet {
    let mut patterns = options.exclude.clone();

    if let Some(file) = &options.exclude_file {
        let path = repo_root.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let from_file = parse_exclude_file(&content);
                debug!("Read {} pattern(s) from {}", from_file.len(), path.display());
                patterns.extend(from_file);
            }
            Err(e) => debug!("Ignoring exclude file {}: {}", path.display(), e),
        }
    }

    let mut set = ExclusionSet::new(patterns);
    if let Some(rel) = repo_relative(repo_root, &options.out) {
        set.exclude_path(&rel);
    }

    if !set.is_empty() {
        let listed: Vec<String> = set.patterns().iter().map(Pattern::as_str).collect();
        debug!("Excluding: {}", listed.join(", "));
    }
    set
}

/// `path` relative to `repo_root` with `/` separators, if it lies inside it.
fn repo_relative(repo_root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(repo_root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Parse an exclude file: one pattern per line, `#` comments.
///
/// Lines whose first non-blank character is `#` are dropped, as is any
/// whitespace-preceded `#` and the rest of its line.
pub fn parse_exclude_file(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .map(|line| strip_trailing_comment(line).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_trailing_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if b == b'#' && bytes[i - 1].is_ascii_whitespace() {
            return &line[..i];
        }
    }
    line
}
