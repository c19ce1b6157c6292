//! Inlining untracked files into the payload.
//!
//! Each file becomes `File: <path>\n<content-or-marker>\n`. Oversized and
//! binary files are replaced by a marker; a file that can't be stat'ed or
//! read gets an error marker instead of failing the run.

use std::fmt;
use std::path::Path;

use tracing::debug;

/// Heading of the untracked-files section.
pub const UNTRACKED_HEADER: &str = "Untracked files:";

/// What ends up in the payload for one untracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntrackedContent {
    Text(String),
    TooLarge { size: u64 },
    Binary { size: u64 },
    ReadError(String),
}

impl fmt::Display for UntrackedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UntrackedContent::Text(text) => f.write_str(text),
            UntrackedContent::TooLarge { size } => {
                write!(f, "[skipped: file too large ({} bytes)]", size)
            }
            UntrackedContent::Binary { size } => {
                write!(f, "[skipped: binary file ({} bytes)]", size)
            }
            UntrackedContent::ReadError(message) => {
                write!(f, "[error reading file: {}]", message)
            }
        }
    }
}

/// A buffer is binary if it contains a NUL byte anywhere.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.contains(&0)
}

/// Load one untracked file, relative to `repo_root`.
///
/// Files strictly larger than `max_size` are not read.
pub async fn load_untracked(repo_root: &Path, path: &str, max_size: u64) -> UntrackedContent {
    let full_path = repo_root.join(path);

    let size = match tokio::fs::metadata(&full_path).await {
        Ok(meta) => meta.len(),
        Err(e) => return UntrackedContent::ReadError(e.to_string()),
    };

    if size > max_size {
        debug!("Skipping {}: {} bytes exceeds {}", path, size, max_size);
        return UntrackedContent::TooLarge { size };
    }

    match tokio::fs::read(&full_path).await {
        Ok(bytes) if is_binary(&bytes) => {
            debug!("Skipping binary file {}", path);
            UntrackedContent::Binary {
                size: bytes.len() as u64,
            }
        }
        Ok(bytes) => UntrackedContent::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => UntrackedContent::ReadError(e.to_string()),
    }
}

pub fn format_entry(path: &str, content: &UntrackedContent) -> String {
    format!("File: {}\n{}\n", path, content)
}

/// Render the untracked section for `paths`, one file at a time, in order.
pub async fn render_untracked_section(repo_root: &Path, paths: &[String], max_size: u64) -> String {
    let mut section = format!("{}\n", UNTRACKED_HEADER);
    for path in paths {
        let content = load_untracked(repo_root, path, max_size).await;
        section.push_str(&format_entry(path, &content));
    }
    section
}
