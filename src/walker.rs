//! # Walker Module
//!
//! Recursively walks the root directory and groups the files it finds by
//! extension. Excluded nodes are pruned: an excluded directory is never
//! descended into.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::exclude::ExclusionMatcher;

/// Files discovered under the root, keyed by extension (leading dot
/// included).
///
/// Each list keeps discovery order. Extensions iterate in sorted order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileGroup {
  files: BTreeMap<String, Vec<PathBuf>>,
}

impl FileGroup {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends `path` to the list for `ext`.
  pub fn insert(&mut self, ext: &str, path: PathBuf) {
    self.files.entry(ext.to_string()).or_default().push(path);
  }

  /// Files found for `ext`, if any.
  pub fn get(&self, ext: &str) -> Option<&[PathBuf]> {
    self.files.get(ext).map(Vec::as_slice)
  }

  pub fn extensions(&self) -> impl Iterator<Item = &str> {
    self.files.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
    self.files.iter().map(|(ext, files)| (ext.as_str(), files.as_slice()))
  }

  /// Number of distinct extensions.
  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Total number of files across all extensions.
  pub fn file_count(&self) -> usize {
    self.files.values().map(Vec::len).sum()
  }
}

/// Returns the extension of a file name: the suffix starting at the final
/// `.`, or an empty string when there is no dot.
///
/// `archive.tar.gz` gives `.gz`, `.bashrc` gives `.bashrc`, `Makefile` gives
/// `""`.
pub fn file_extension(name: &str) -> &str {
  name.rfind('.').map_or("", |idx| &name[idx..])
}

/// Walks `root` depth-first and returns every non-excluded regular file
/// grouped by extension.
///
/// The root itself is tested against the exclusions too. Symlinks are
/// followed. Any I/O error aborts the walk.
///
/// # Errors
///
/// Returns the first error from opening, stat-ing or reading a directory
/// entry, including symlink loops.
pub fn walk(root: &Path, exclusions: &ExclusionMatcher) -> Result<FileGroup> {
  let mut group = FileGroup::new();

  debug!("Scanning directory: {}", root.display());
  let start_time = std::time::Instant::now();

  let walker = WalkDir::new(root)
    .follow_links(true)
    .into_iter()
    .filter_entry(|entry| !exclusions.is_excluded(entry.path()));

  for entry in walker {
    let entry = entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;

    if !entry.file_type().is_file() {
      continue;
    }

    let name = entry.file_name().to_string_lossy().into_owned();
    let ext = file_extension(&name).to_string();
    if !name.ends_with(&ext) {
      continue;
    }

    trace!("Found: {}", entry.path().display());
    group.insert(&ext, entry.into_path());
  }

  debug!(
    "Found {} files with {} extensions in {}ms",
    group.file_count(),
    group.len(),
    start_time.elapsed().as_millis()
  );

  Ok(group)
}
