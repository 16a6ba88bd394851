//! # Processor Module
//!
//! Orchestrates one run: walk the root, then for every extension group look
//! up the renderer, render the header once, and decide and apply per file.
//!
//! All run-wide state lives in a [`RunContext`] built once from the
//! configuration and borrowed by the [`Processor`]. The run is sequential; in
//! check mode it stops at the first file that would change.

mod file_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
pub use file_io::read_content;
use tracing::{debug, info};

use crate::config::Config;
use crate::decision::{Action, decide};
use crate::diff::DiffManager;
use crate::exclude::ExclusionMatcher;
use crate::renderer::RendererRegistry;
use crate::templates::{RawHeader, TemplateManager, with_default_properties};
use crate::updater::{apply, updated_content};
use crate::walker::walk;

/// Everything a run needs, resolved from the configuration up front.
#[derive(Debug)]
pub struct RunContext {
  /// Absolute root directory to walk
  pub root: PathBuf,

  /// Expanded template text, shared by every renderer
  pub raw_header: RawHeader,

  /// Active exclusion set (configured, defaults, and their rooted forms)
  pub exclusions: ExclusionMatcher,

  /// Comment styles by extension
  pub registry: RendererRegistry,

  /// Extensions to restrict the run to; empty means all
  pub adapter: Vec<String>,
}

impl RunContext {
  /// Resolves the root, expands the template and builds the exclusion set.
  ///
  /// # Errors
  ///
  /// Fails if the template cannot be read or an exclusion pattern does not
  /// compile.
  pub fn from_config(config: &Config, cwd: &Path) -> Result<Self> {
    let root = config.resolve_root(cwd);
    let template_path = config.resolve_template(cwd);

    let mut template_manager = TemplateManager::new();
    template_manager.load_template(&template_path)?;
    let properties = with_default_properties(&config.properties);
    let raw_header = RawHeader::new(template_manager.render(&properties)?);

    let exclusions = ExclusionMatcher::new(&root, &config.excludes, config.use_default_excludes)
      .context("Failed to build exclusion patterns")?;

    debug!(
      "Run context: root={}, {} header lines, {} exclusion patterns",
      root.display(),
      raw_header.lines().len(),
      exclusions.patterns().count()
    );

    Ok(Self {
      root,
      raw_header,
      exclusions,
      registry: RendererRegistry::with_config_styles(config),
      adapter: config.adapter.clone(),
    })
  }

  /// Whether files with `ext` take part in this run.
  pub fn is_adapted(&self, ext: &str) -> bool {
    self.adapter.is_empty() || self.adapter.iter().any(|a| a == ext)
  }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  pub path: PathBuf,
  pub action: Action,
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
  /// Check mode found a file that needs a header change; nothing was written.
  ChangeRequired { path: PathBuf, action: Action },

  /// Every file was handled. In check mode all actions are [`Action::None`].
  Completed(Vec<FileReport>),
}

/// Runs header stamping over a [`RunContext`].
pub struct Processor {
  ctx: RunContext,
  check_only: bool,
  diff_manager: DiffManager,
}

impl Processor {
  pub fn new(ctx: RunContext, check_only: bool, diff_manager: DiffManager) -> Self {
    Self {
      ctx,
      check_only,
      diff_manager,
    }
  }

  pub fn context(&self) -> &RunContext {
    &self.ctx
  }

  /// Walks the root and processes every file with a registered renderer.
  ///
  /// Extensions are visited in sorted order. Per-file log lines for a group
  /// are emitted once the whole group is done.
  ///
  /// # Errors
  ///
  /// The first traversal, read or write error ends the run.
  pub fn run(&self) -> Result<RunOutcome> {
    let start_time = Instant::now();
    let files = walk(&self.ctx.root, &self.ctx.exclusions)?;
    let mut reports = Vec::with_capacity(files.file_count());

    for (ext, paths) in files.iter() {
      if !self.ctx.is_adapted(ext) {
        debug!("Skipping {} file(s) with extension '{}': not in Adapter", paths.len(), ext);
        continue;
      }

      let Some(renderer) = self.ctx.registry.lookup(ext) else {
        debug!("Skipping {} file(s) with extension '{}': no comment style", paths.len(), ext);
        continue;
      };

      let header = renderer.render(&self.ctx.raw_header);
      let mut batch = Vec::with_capacity(paths.len());

      for path in paths {
        let original = read_content(path)?;
        let action = decide(&original, &header);

        if action != Action::None {
          self.show_diff(path, action, &header, &original)?;

          if self.check_only {
            debug!("Change required for {}: {}", path.display(), action);
            return Ok(RunOutcome::ChangeRequired {
              path: path.clone(),
              action,
            });
          }

          apply(path, action, &header, &original)?;
        }

        batch.push(FileReport {
          path: path.clone(),
          action,
        });
      }

      batch.iter().for_each(log_report);
      reports.extend(batch);
    }

    debug!(
      "Processed {} files in {}ms",
      reports.len(),
      start_time.elapsed().as_millis()
    );

    Ok(RunOutcome::Completed(reports))
  }

  fn show_diff(&self, path: &Path, action: Action, header: &str, original: &[u8]) -> Result<()> {
    if !self.diff_manager.is_enabled() {
      return Ok(());
    }
    match updated_content(action, header, original) {
      Some(new) => self
        .diff_manager
        .display_diff(path, &String::from_utf8_lossy(original), &String::from_utf8_lossy(&new)),
      None => Ok(()),
    }
  }
}

/// Decides and applies `header` to a single file.
///
/// `header` is the rendered output of the file's [`HeaderRenderer`](crate::renderer::HeaderRenderer).
pub fn process_file(path: &Path, header: &str) -> Result<FileReport> {
  let original = read_content(path)?;
  let action = decide(&original, header);
  apply(path, action, header, &original)?;

  let report = FileReport {
    path: path.to_path_buf(),
    action,
  };
  log_report(&report);
  Ok(report)
}

fn log_report(report: &FileReport) {
  let path = report.path.display();
  match report.action {
    Action::None => info!("Don't need to be updated [{}]", path),
    Action::Add => info!("Added header to file [{}]", path),
    Action::Replace => info!("Updated header to file [{}]", path),
  }
}
