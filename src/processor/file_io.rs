//! # File I/O Module
//!
//! Reads file content for the decision engine. Writes go through
//! [`crate::updater::apply`].

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the whole file as raw bytes.
///
/// No encoding is assumed: headers are matched and written line by line on
/// bytes, so Latin-1 or other non-UTF-8 sources are stamped like any other.
///
/// # Errors
///
/// Fails when the file cannot be read.
pub fn read_content(path: &Path) -> Result<Vec<u8>> {
  std::fs::read(path).with_context(|| format!("Reads file error: {}", path.display()))
}
