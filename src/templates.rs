//! # Templates Module
//!
//! This module loads the header template and expands it against the property
//! map from the configuration, producing the [`RawHeader`] that every
//! renderer works from.
//!
//! Placeholders use the `{{.Key}}` form. There are no control-flow
//! directives; expansion is plain substitution.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use std::path::Path;
//!
//! use headstamp::templates::{RawHeader, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut template_manager = TemplateManager::new();
//! template_manager.load_template(Path::new("header.tmpl"))?;
//!
//! let mut properties = HashMap::new();
//! properties.insert("Owner".to_string(), "ACME Corp".to_string());
//!
//! let raw_header = RawHeader::new(template_manager.render(&properties)?);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::Datelike;
use regex::{Captures, Regex};
use tracing::{debug, warn};

/// Text substituted for a placeholder whose key has no property.
pub const MISSING_VALUE: &str = "<no value>";

/// Property filled in with the current year when the configuration leaves it
/// out.
pub const YEAR_PROPERTY: &str = "Year";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex must compile")
});

/// The expanded header text and its line decomposition.
///
/// Built once per run and never mutated. `lines` uses the same splitting as
/// file content so that line-for-line comparison is well defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
  content: String,
  lines: Vec<String>,
}

impl RawHeader {
  pub fn new(content: impl Into<String>) -> Self {
    let content = content.into();
    let lines = content.split('\n').map(str::to_string).collect();
    Self { content, lines }
  }

  /// The full expanded header text.
  pub fn content(&self) -> &str {
    &self.content
  }

  /// The header text split on `\n`.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}

/// Manager for loading and expanding the header template.
#[derive(Debug, Default)]
pub struct TemplateManager {
  /// The loaded template content
  template: String,
}

impl TemplateManager {
  /// Creates a new manager with an empty template.
  ///
  /// You must call [`load_template`](Self::load_template) or
  /// [`with_template`](Self::with_template) before rendering anything useful.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a manager from template text already in memory.
  pub fn with_template(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
    }
  }

  /// Loads the header template from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read or is not
  /// valid UTF-8.
  pub fn load_template(&mut self, path: &Path) -> Result<()> {
    debug!("Loading template from: {}", path.display());

    let template_content =
      fs::read_to_string(path).with_context(|| format!("Can't find header template [{}]", path.display()))?;

    self.template = template_content;

    Ok(())
  }

  /// Expands every `{{.Key}}` placeholder with the matching property.
  ///
  /// Keys are case-sensitive. A key with no property expands to
  /// [`MISSING_VALUE`] and logs a warning.
  pub fn render(&self, properties: &HashMap<String, String>) -> Result<String> {
    let rendered = PLACEHOLDER.replace_all(&self.template, |caps: &Captures<'_>| {
      let key = &caps[1];
      match properties.get(key) {
        Some(value) => value.clone(),
        None => {
          warn!("Template property '{}' is not defined", key);
          MISSING_VALUE.to_string()
        }
      }
    });

    Ok(rendered.into_owned())
  }
}

/// Returns `properties` with [`YEAR_PROPERTY`] set to the current year unless
/// it is already present.
pub fn with_default_properties(properties: &HashMap<String, String>) -> HashMap<String, String> {
  let mut merged = properties.clone();
  merged
    .entry(YEAR_PROPERTY.to_string())
    .or_insert_with(|| chrono::Local::now().year().to_string());
  merged
}
