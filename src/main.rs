//! # headstamp
//!
//! Stamps license headers onto the source files of a directory tree.

use std::process;

use anyhow::Result;
use headstamp::cli::{Cli, StampStatus, run_stamp};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  if run_stamp(cli.stamp_args)? == StampStatus::ChangeRequired {
    process::exit(1);
  }

  Ok(())
}
