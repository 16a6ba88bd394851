//! # Decision Module
//!
//! Compares the top of a file with its rendered header and decides what to
//! do about it. This is a heuristic on trimmed lines, not a parser: a file
//! whose first lines happen to look like the header is treated as having one.

use std::fmt;

/// Minimum similarity score (inclusive) for an existing block to be treated
/// as a stale header and replaced. Anything lower gets a new header prepended.
pub const REPLACE_THRESHOLD: u8 = 70;

/// Outcome of comparing a file against its rendered header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  /// The header is already in place
  None,
  /// Prepend the header, keeping all existing content
  Add,
  /// Overwrite the first lines of the file with the header
  Replace,
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Action::None => write!(f, "none"),
      Action::Add => write!(f, "add"),
      Action::Replace => write!(f, "replace"),
    }
  }
}

/// Splits content into lines on `\n`.
///
/// Unlike [`str::lines`], a trailing newline yields a trailing empty line and
/// `\r` is kept, so headers and file content split identically. Content is
/// handled as raw bytes; files need not be valid UTF-8.
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
  content.split(|b| *b == b'\n').collect()
}

/// Strips surrounding whitespace, Unicode-aware when the line decodes as
/// UTF-8 and ASCII-only otherwise.
fn trim_line(line: &[u8]) -> &[u8] {
  match std::str::from_utf8(line) {
    Ok(text) => text.trim().as_bytes(),
    Err(_) => line.trim_ascii(),
  }
}

/// Percentage in `[0, 100]` of positions where the trimmed lines are equal.
///
/// Returns 0 when the slices differ in length or are empty.
pub fn similarity<A, B>(lines1: &[A], lines2: &[B]) -> u8
where
  A: AsRef<[u8]>,
  B: AsRef<[u8]>,
{
  if lines1.len() != lines2.len() || lines1.is_empty() {
    return 0;
  }

  let same = lines1
    .iter()
    .zip(lines2)
    .filter(|(l1, l2)| trim_line(l1.as_ref()) == trim_line(l2.as_ref()))
    .count();

  // Integer division floors, same as floor(same / len * 100).
  (same * 100 / lines1.len()) as u8
}

/// Decides whether `header` must be added to, replaced in, or left alone in
/// `original_content`.
pub fn decide(original_content: &[u8], header: &str) -> Action {
  let header_lines = split_lines(header.as_bytes());
  let content_lines = split_lines(original_content);

  if header_lines.len() > content_lines.len() {
    return Action::Add;
  }

  let candidate = &content_lines[..header_lines.len()];

  match similarity(candidate, &header_lines) {
    100.. => Action::None,
    score if score >= REPLACE_THRESHOLD => Action::Replace,
    _ => Action::Add,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const GO_HEADER: &str = "// Copyright 2024\n// MIT\n";

  #[test]
  fn test_split_lines_keeps_trailing_empty() {
    assert_eq!(split_lines(b"a\nb\n"), [&b"a"[..], &b"b"[..], &b""[..]]);
    assert_eq!(split_lines(b""), [&b""[..]]);
    assert_eq!(split_lines(b"a\r\nb"), [&b"a\r"[..], &b"b"[..]]);
  }

  #[test]
  fn test_similarity_full_match() {
    assert_eq!(similarity(&["a", "b"], &["a", "b"]), 100);
  }

  #[test]
  fn test_similarity_ignores_surrounding_whitespace() {
    assert_eq!(similarity(&["  a\r", "b "], &["a", "\tb"]), 100);
    assert_eq!(similarity(&["\u{a0}a"], &["a"]), 100);
  }

  #[test]
  fn test_similarity_non_utf8_lines() {
    let latin1: [&[u8]; 2] = [b"  caf\xe9 ", b"x"];
    let header: [&[u8]; 2] = [b"caf\xe9", b"y"];
    assert_eq!(similarity(&latin1, &header), 50);
  }

  #[test]
  fn test_similarity_floors() {
    assert_eq!(similarity(&["a", "x", "x"], &["a", "b", "c"]), 33);
    assert_eq!(similarity(&["a", "b", "x"], &["a", "b", "c"]), 66);
  }

  #[test]
  fn test_similarity_length_mismatch() {
    assert_eq!(similarity(&["a"], &["a", "b"]), 0);
  }

  #[test]
  fn test_similarity_empty() {
    let empty: [&str; 0] = [];
    assert_eq!(similarity(&empty, &empty), 0);
  }

  #[test]
  fn test_decide_file_shorter_than_header() {
    assert_eq!(decide(b"", GO_HEADER), Action::Add);
    assert_eq!(decide(b"// Copyright 2024", GO_HEADER), Action::Add);
  }

  #[test]
  fn test_decide_exact_header() {
    let content = format!("{GO_HEADER}\npackage main\n");
    assert_eq!(decide(content.as_bytes(), GO_HEADER), Action::None);
  }

  #[test]
  fn test_decide_whitespace_only_differences() {
    let content = "  // Copyright 2024  \n// MIT\r\n\npackage main\n";
    // "// MIT\r" trims to "// MIT"; the trailing header line "" matches "".
    assert_eq!(decide(content.as_bytes(), GO_HEADER), Action::None);
  }

  #[test]
  fn test_decide_stale_year_below_threshold_adds() {
    // Three header lines ("", trailing) with two matching: 66 < 70.
    let content = "// Copyright 2023\n// MIT\n\nfunc main(){}\n";
    assert_eq!(decide(content.as_bytes(), GO_HEADER), Action::Add);

    let content = "// Copyright 2023\n// MIT\npackage main\n";
    assert_eq!(decide(content.as_bytes(), GO_HEADER), Action::Add);
  }

  #[test]
  fn test_decide_stale_header_replaces() {
    let header = "# Copyright 2024\n# Owner\n# Line 3\n# Line 4\n";
    let content = "# Copyright 2019\n# Owner\n# Line 3\n# Line 4\n\nputs 1\n";
    // 4 of 5 lines match: 80.
    assert_eq!(decide(content.as_bytes(), header), Action::Replace);
  }

  #[test]
  fn test_decide_exactly_at_threshold_replaces() {
    let header: String = (0..9).map(|i| format!("# line {i}\n")).collect();
    // header has 10 lines (trailing ""); change 3 of them to get 7/10 = 70.
    let mut lines: Vec<String> = header.split('\n').map(str::to_string).collect();
    lines[0] = "# changed".to_string();
    lines[1] = "# changed".to_string();
    lines[2] = "# changed".to_string();
    lines.push("body".to_string());
    let content = lines.join("\n");
    assert_eq!(decide(content.as_bytes(), &header), Action::Replace);
  }

  #[test]
  fn test_decide_unrelated_content_adds() {
    let content = "package main\n\nimport \"fmt\"\n\nfunc main() {}\n";
    assert_eq!(decide(content.as_bytes(), GO_HEADER), Action::Add);
  }

  #[test]
  fn test_decide_latin1_file() {
    let content = b"// Copyright 2024\n// MIT\n\npackage main // caf\xe9\n";
    assert_eq!(decide(content, GO_HEADER), Action::None);
    assert_eq!(decide(b"package a // caf\xe9\n", GO_HEADER), Action::Add);
  }

  #[test]
  fn test_action_display() {
    assert_eq!(Action::None.to_string(), "none");
    assert_eq!(Action::Add.to_string(), "add");
    assert_eq!(Action::Replace.to_string(), "replace");
  }
}
