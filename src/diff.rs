//! # Diff Module
//!
//! Renders a line diff between a file and its stamped version. Used to
//! preview what a run would change, either on stderr or appended to a file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Number of unchanged lines shown around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Where header change previews go.
#[derive(Debug, Default, Clone)]
pub struct DiffManager {
  /// Print diffs to stderr
  pub show_diff: bool,

  /// Append diffs to this file
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Returns `true` if any diff output was requested.
  pub fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the save file so a run starts with an empty diff.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Shows and/or saves the diff from `original` to `new` for `path`.
  ///
  /// Diffs from several files are appended to the same save file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let diff = TextDiff::from_lines(original, new);
    let name = path.display().to_string();
    let unified = diff
      .unified_diff()
      .context_radius(CONTEXT_RADIUS)
      .header(&name, &name)
      .to_string();

    if self.show_diff {
      eprintln!("Diff for {}:", name);
      for change in diff.iter_all_changes() {
        let line = match change.tag() {
          ChangeTag::Delete => format!("-{change}")
            .if_supports_color(Stream::Stderr, |s| s.red())
            .to_string(),
          ChangeTag::Insert => format!("+{change}")
            .if_supports_color(Stream::Stderr, |s| s.green())
            .to_string(),
          ChangeTag::Equal => format!(" {change}"),
        };
        eprint!("{line}");
        if change.missing_newline() {
          eprintln!();
        }
      }
      eprintln!();
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(unified.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
