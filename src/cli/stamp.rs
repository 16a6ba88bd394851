//! # Stamp Command
//!
//! Loads the configuration, builds the run context and runs the processor
//! in write or check mode.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{Tally, print_change_required, print_decision_list, print_start_message, print_summary};
use crate::processor::{Processor, RunContext, RunOutcome};
use crate::verbose_log;

/// Arguments for stamping headers
#[derive(Args, Debug, Default)]
pub struct StampArgs {
  /// Check mode: exit with status 1 on the first file that needs a header
  /// change, without modifying anything
  #[arg(long)]
  pub check: bool,

  /// Path to config file (default: $HEADSTAMP_CONFIG, then .header.cfg in the
  /// current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Show a diff of each header change on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of each header change to a file
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Increase verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampStatus {
  /// Every file was processed (or, in check mode, already up to date)
  Clean,
  /// Check mode found a file that needs a header change
  ChangeRequired,
}

/// Run headstamp with the given arguments.
///
/// # Errors
///
/// Any configuration, template, traversal, read or write error.
pub fn run_stamp(args: StampArgs) -> Result<StampStatus> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
  let config = load_config(args.config.as_deref(), &cwd)?;
  let ctx = RunContext::from_config(&config, &cwd)?;
  let root = ctx.root.clone();

  verbose_log!("Root: {}", root.display());
  for pattern in ctx.exclusions.patterns() {
    verbose_log!("Exclude: {}", pattern);
  }

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  debug!("Check mode: {}", args.check);
  print_start_message(&root, args.check);

  let processor = Processor::new(ctx, args.check, diff_manager);
  match processor.run()? {
    RunOutcome::ChangeRequired { path, action } => {
      print_change_required(&path, action, &root);
      Ok(StampStatus::ChangeRequired)
    }
    RunOutcome::Completed(reports) => {
      print_decision_list(&reports, &root);
      print_summary(&Tally::from_reports(&reports));
      Ok(StampStatus::Clean)
    }
  }
}
