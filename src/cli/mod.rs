//! # CLI Module
//!
//! Command-line interface for the `headstamp` binary, parsed with clap.

mod stamp;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use stamp::{StampArgs, StampStatus, run_stamp};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Configuration is read from .header.cfg in the current directory
(or --config / HEADSTAMP_CONFIG):

  {
    \"Dir\": \"./\",
    \"Template\": \"./header.tmpl\",
    \"Excludes\": [\"testdata\", \"*.pb.go\"],
    \"UseDefaultExcludes\": true,
    \"Properties\": { \"Owner\": \"ACME Corp\" }
  }

Examples:
  # Add or refresh headers under Dir
  headstamp

  # Fail (exit 1) if any file needs a header change, for CI
  headstamp --check

  # Preview the change that fails the check
  headstamp --check --show-diff
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub stamp_args: StampArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;
  use crate::logging::ColorMode;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["headstamp"]).unwrap();
    assert!(!cli.stamp_args.check);
    assert!(cli.stamp_args.config.is_none());
    assert_eq!(cli.stamp_args.verbose, 0);
    assert_eq!(cli.stamp_args.colors, ColorMode::Auto);
  }

  #[test]
  fn test_parse_check_with_diff() {
    let cli = Cli::try_parse_from(["headstamp", "--check", "--show-diff", "-vv", "--colors", "never"]).unwrap();
    assert!(cli.stamp_args.check);
    assert!(cli.stamp_args.show_diff);
    assert_eq!(cli.stamp_args.verbose, 2);
    assert_eq!(cli.stamp_args.colors, ColorMode::Never);
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["headstamp", "-q", "-v"]).is_err());
  }
}
