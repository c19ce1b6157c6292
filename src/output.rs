//! Previewing and persisting the rendered prompt.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::OutputError;

/// The first `lines` lines of `text`, followed by a note when more remain.
///
/// A zero line count yields an empty preview.
pub fn preview(text: &str, lines: u64) -> String {
    if lines == 0 {
        return String::new();
    }

    let all: Vec<&str> = text.lines().collect();
    let shown = usize::try_from(lines).unwrap_or(usize::MAX).min(all.len());
    let mut out = all[..shown].join("\n");

    let remaining = all.len() - shown;
    if remaining > 0 {
        out.push_str(&format!("\n... ({} more lines)", remaining));
    }
    out
}

/// Write `text` to `path`, replacing any existing file.
///
/// Parent directories are created. The content goes to a temporary file in
/// the destination directory first, so a failed write never leaves a
/// truncated prompt behind.
pub fn write_prompt(path: &Path, text: &str) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_failed = |source: std::io::Error| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(text.as_bytes()).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;

    tmp.persist(path).map_err(|e| OutputError::PersistFailed {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
