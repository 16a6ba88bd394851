//! # Updater Module
//!
//! Applies a decided [`Action`] to a file on disk.
//!
//! Writes are a direct truncate-and-write of the whole file. A failed write is
//! an error for the caller; nothing attempts to recover partial content.

use std::path::Path;

use anyhow::{Context, Result};

use crate::decision::{Action, split_lines};

/// Computes the new file content for `action`, or `None` when the file stays
/// as it is.
///
/// - [`Action::Add`]: `header`, a blank line, then the untouched original.
/// - [`Action::Replace`]: the header lines followed by every original line
///   after the first N (N = header line count), joined with `\n`.
///
/// The original is raw bytes, so content in any encoding passes through
/// unchanged.
pub fn updated_content(action: Action, header: &str, original: &[u8]) -> Option<Vec<u8>> {
  match action {
    Action::None => None,
    Action::Add => {
      let mut content = Vec::with_capacity(header.len() + 1 + original.len());
      content.extend_from_slice(header.as_bytes());
      content.push(b'\n');
      content.extend_from_slice(original);
      Some(content)
    }
    Action::Replace => {
      let mut lines = split_lines(header.as_bytes());
      let header_len = lines.len();
      lines.extend(split_lines(original).into_iter().skip(header_len));
      Some(lines.join(&b'\n'))
    }
  }
}

/// Rewrites `path` according to `action`.
///
/// Returns `true` if the file was written. [`Action::None`] performs no I/O.
pub fn apply(path: &Path, action: Action, header: &str, original: &[u8]) -> Result<bool> {
  let Some(content) = updated_content(action, header, original) else {
    return Ok(false);
  };

  std::fs::write(path, content).with_context(|| format!("Write file err: {}", path.display()))?;
  Ok(true)
}
