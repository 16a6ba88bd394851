//! # headstamp
//!
//! Stamps or refreshes license header comments at the top of source files
//! across a directory tree.
//!
//! A run walks the configured root, groups files by extension, renders the
//! header template once per extension with that language's comment style, and
//! then for each file decides whether the header is already present, must be
//! added, or replaces a stale block that looks like a previous header.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headstamp::config::load_config;
//! use headstamp::diff::DiffManager;
//! use headstamp::processor::{Processor, RunContext, RunOutcome};
//!
//! fn main() -> anyhow::Result<()> {
//!     let cwd = Path::new(".");
//!     let config = load_config(None, cwd)?;
//!     let ctx = RunContext::from_config(&config, cwd)?;
//!
//!     // Check mode: nothing is written.
//!     let processor = Processor::new(ctx, true, DiffManager::default());
//!     if let RunOutcome::ChangeRequired { path, action } = processor.run()? {
//!         println!("{} needs: {}", path.display(), action);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`config`] - `.header.cfg` loading and validation
//! * [`templates`] - Template expansion into a [`templates::RawHeader`]
//! * [`renderer`] - Comment styles per extension
//! * [`exclude`] - Glob exclusions
//! * [`walker`] - Directory traversal grouped by extension
//! * [`decision`] - None / Add / Replace decision
//! * [`updater`] - Applying a decision to disk
//! * [`processor`] - Run orchestration
//!
//! [`config`]: crate::config
//! [`templates`]: crate::templates
//! [`renderer`]: crate::renderer
//! [`exclude`]: crate::exclude
//! [`walker`]: crate::walker
//! [`decision`]: crate::decision
//! [`updater`]: crate::updater
//! [`processor`]: crate::processor

pub mod cli;
pub mod config;
pub mod decision;
pub mod diff;
pub mod exclude;
pub mod logging;
pub mod output;
pub mod processor;
pub mod renderer;
pub mod templates;
pub mod updater;
pub mod walker;
