//! # Output Module
//!
//! This module centralizes all user-facing output for headstamp.
//! Diagnostics go through `tracing` on stderr; the messages here go to
//! stdout so a run can be read at a glance.
//!
//! - Quiet mode (`-q`) prints nothing here except the offending path in
//!   check mode
//! - Verbose mode (`-v`) lists every processed file

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::decision::Action;
use crate::info_log;
use crate::logging::{is_quiet, is_verbose};
use crate::processor::FileReport;

/// Symbols used in output
pub mod symbols {
  /// Header already in place
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header missing
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header replaced
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Counts of each action across a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
  pub unchanged: usize,
  pub added: usize,
  pub replaced: usize,
}

impl Tally {
  pub fn from_reports(reports: &[FileReport]) -> Self {
    reports.iter().fold(Self::default(), |mut tally, report| {
      match report.action {
        Action::None => tally.unchanged += 1,
        Action::Add => tally.added += 1,
        Action::Replace => tally.replaced += 1,
      }
      tally
    })
  }

  pub fn total(&self) -> usize {
    self.unchanged + self.added + self.replaced
  }
}

/// Print "Checking <root>..." or "Stamping <root>...".
pub fn print_start_message(root: &Path, check_only: bool) {
  let verb = if check_only { "Checking" } else { "Stamping" };
  info_log!("{} {}...", verb, root.display());
}

/// In verbose mode, list every processed file with its action.
pub fn print_decision_list(reports: &[FileReport], root: &Path) {
  if !is_verbose() || is_quiet() {
    return;
  }

  for report in reports {
    let display_path = make_relative_path(&report.path, root);
    let symbol = match report.action {
      Action::None => symbols::SUCCESS
        .if_supports_color(Stream::Stdout, |s| s.green())
        .to_string(),
      Action::Add => symbols::FAILURE
        .if_supports_color(Stream::Stdout, |s| s.red())
        .to_string(),
      Action::Replace => symbols::UPDATED
        .if_supports_color(Stream::Stdout, |s| s.yellow())
        .to_string(),
    };
    println!("  {} {} ({})", symbol, display_path, report.action);
  }
}

/// Print the processing summary.
///
/// Format: "Summary: X unchanged, Y added, Z replaced"
pub fn print_summary(tally: &Tally) {
  if is_quiet() {
    return;
  }

  let changed = |n: usize| {
    if n > 0 {
      n.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string()
    } else {
      n.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
    }
  };

  println!(
    "Summary: {} unchanged, {} added, {} replaced",
    tally.unchanged.if_supports_color(Stream::Stdout, |s| s.cyan()),
    changed(tally.added),
    changed(tally.replaced)
  );
}

/// Print the file that made a check-mode run fail.
///
/// In quiet mode only the path is printed, for scripting.
pub fn print_change_required(path: &Path, action: Action, root: &Path) {
  let display_path = make_relative_path(path, root);

  if is_quiet() {
    println!("{}", display_path);
    return;
  }

  let what = match action {
    Action::Replace => "has an outdated header",
    _ => "is missing the header",
  };
  println!(
    "{} {} {}",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    display_path,
    what
  );
  println!(
    "{}",
    "Run without --check to stamp headers.".if_supports_color(Stream::Stdout, |s| s.yellow())
  );
}

/// Make a path relative to the run root for display.
fn make_relative_path(path: &Path, root: &Path) -> String {
  pathdiff::diff_paths(path, root)
    .filter(|rel| !rel.as_os_str().is_empty())
    .unwrap_or_else(|| path.to_path_buf())
    .display()
    .to_string()
}
