//! # Exclude Module
//!
//! Decides whether a path found during the walk should be skipped.
//!
//! Patterns use shell-glob semantics: `*` and `?` never match `/`, character
//! classes are supported, and there is no recursive `**`. Every configured
//! pattern is active twice: once as written and once re-rooted under the
//! run's root directory. This way a relative exclusion such as `vendor`
//! matches the absolute paths the walker produces.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::trace;

/// Exclusions appended when the configuration enables default excludes.
pub const DEFAULT_EXCLUDES: &[&str] = &[
  ".git",
  ".svn",
  ".hg",
  "node_modules",
  "vendor",
  "_build",
  "deps",
  "target",
  ".idea",
  ".vscode",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Error type for exclusion patterns.
#[derive(Debug, thiserror::Error)]
pub enum ExcludeError {
  /// The pattern is not a valid glob.
  #[error("Exclude path match error, caused by: invalid pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    source: glob::PatternError,
  },
}

/// The active exclusion set for one run.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
  patterns: Vec<Pattern>,
}

impl ExclusionMatcher {
  /// Builds the active set from the configured patterns.
  ///
  /// # Parameters
  ///
  /// * `root` - Absolute root directory of the run
  /// * `patterns` - Exclusions as written in the configuration
  /// * `use_default_excludes` - Whether to append [`DEFAULT_EXCLUDES`]
  ///
  /// # Errors
  ///
  /// Returns [`ExcludeError::InvalidPattern`] for the first pattern that does
  /// not compile.
  pub fn new<S: AsRef<str>>(root: &Path, patterns: &[S], use_default_excludes: bool) -> Result<Self, ExcludeError> {
    let mut sources: Vec<String> = patterns.iter().map(|p| p.as_ref().replace('\\', "/")).collect();
    if use_default_excludes {
      sources.extend(DEFAULT_EXCLUDES.iter().map(|p| p.to_string()));
    }

    let root = to_slash(root);
    let rooted: Vec<String> = sources
      .iter()
      .map(|p| clean_path(&format!("{root}/{p}")))
      .collect();
    sources.extend(rooted);

    let patterns = sources
      .iter()
      .map(|source| compile(source))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self { patterns })
  }

  /// An empty set that excludes nothing.
  pub const fn empty() -> Self {
    Self { patterns: Vec::new() }
  }

  /// Returns `true` if `path` matches any active pattern.
  pub fn is_excluded(&self, path: &Path) -> bool {
    let path = to_slash(path);
    let excluded = self.patterns.iter().any(|p| p.matches_with(&path, MATCH_OPTIONS));
    if excluded {
      trace!("Excluded: {}", path);
    }
    excluded
  }

  /// The active patterns, relative ones first.
  pub fn patterns(&self) -> impl Iterator<Item = &str> {
    self.patterns.iter().map(Pattern::as_str)
  }
}

/// Compiles one exclusion, translating shell-glob syntax the `glob` crate
/// spells differently.
fn compile(source: &str) -> Result<Pattern, ExcludeError> {
  let translated = translate_shell_glob(source);
  Pattern::new(&translated).map_err(|source_err| ExcludeError::InvalidPattern {
    pattern: source.to_string(),
    source: source_err,
  })
}

/// Collapses runs of `*` to one (no recursive wildcard) and rewrites `[^`
/// class negation to `[!`.
fn translate_shell_glob(pattern: &str) -> String {
  let mut out = String::with_capacity(pattern.len());
  let mut chars = pattern.chars().peekable();
  let mut prev = None;

  while let Some(c) = chars.next() {
    match c {
      '*' if prev == Some('*') => continue,
      '[' if chars.peek() == Some(&'^') => {
        chars.next();
        out.push_str("[!");
        prev = Some('!');
        continue;
      }
      _ => out.push(c),
    }
    prev = Some(c);
  }

  out
}

/// Converts a path to a string with `/` as the only separator.
pub fn to_slash(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}

/// Lexically cleans a slash-separated path: drops `.` segments and empty
/// segments, and resolves `..` against the preceding segment when possible.
///
/// # Examples
/// - `/root/./vendor` -> `/root/vendor`
/// - `/root/a/../b/*.go` -> `/root/b/*.go`
/// - `../other/*.go` -> `../other/*.go` (can't resolve, keeps as-is)
pub fn clean_path(path: &str) -> String {
  let absolute = path.starts_with('/');
  let mut components: Vec<&str> = Vec::new();

  for segment in path.split('/') {
    match segment {
      "" | "." => continue,
      ".." => {
        if let Some(last) = components.last()
          && *last != ".."
        {
          components.pop();
          continue;
        }
        if !absolute {
          components.push(segment);
        }
      }
      _ => components.push(segment),
    }
  }

  let joined = components.join("/");
  match (absolute, joined.is_empty()) {
    (true, _) => format!("/{joined}"),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}
