//! # Renderer Module
//!
//! This module turns a [`RawHeader`] into the comment-decorated block that
//! sits at the top of a source file. Each supported language family is a
//! [`CommentStyle`]; styles are registered against file extensions in a
//! [`RendererRegistry`].
//!
//! ```rust
//! use headstamp::renderer::RendererRegistry;
//! use headstamp::templates::RawHeader;
//!
//! let registry = RendererRegistry::builtin();
//! let renderer = registry.lookup(".go").expect("go is registered");
//! let header = RawHeader::new("Copyright 2024\nMIT");
//! assert_eq!(renderer.render(&header), "// Copyright 2024\n// MIT\n");
//! ```

use std::fmt;

use crate::config::{CommentStyleConfig, Config};
use crate::templates::RawHeader;

/// Anything that can decorate a raw header for one language.
pub trait HeaderRenderer: Send + Sync + fmt::Debug {
  /// Render the header. Must be a pure function of `header`.
  fn render(&self, header: &RawHeader) -> String;
}

/// Comment markers for one language family.
///
/// `top` and `bottom` are only set for block comments (e.g. `/*` and ` */`).
/// `marker` prefixes every header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// Line opening the comment block
  pub top: Option<String>,

  /// Prefix for each header line, without the separating space
  pub marker: String,

  /// Line closing the comment block
  pub bottom: Option<String>,
}

impl CommentStyle {
  /// Create a line-comment style (no top/bottom markers).
  pub fn line(marker: &str) -> Self {
    Self {
      top: None,
      marker: marker.to_string(),
      bottom: None,
    }
  }

  /// Create a block-comment style.
  pub fn block(top: &str, marker: &str, bottom: &str) -> Self {
    Self {
      top: Some(top.to_string()),
      marker: marker.to_string(),
      bottom: Some(bottom.to_string()),
    }
  }
}

impl From<&CommentStyleConfig> for CommentStyle {
  fn from(config: &CommentStyleConfig) -> Self {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Self {
      top: non_empty(&config.top),
      marker: config.middle.clone(),
      bottom: non_empty(&config.bottom),
    }
  }
}

/// A line counts as blank only when it is exactly one CR or LF character.
///
/// Empty strings are not blank and render as `marker + " "`.
fn is_blank(line: &str) -> bool {
  line == "\r" || line == "\n"
}

impl HeaderRenderer for CommentStyle {
  fn render(&self, header: &RawHeader) -> String {
    let mut result = String::with_capacity(header.content().len() + header.lines().len() * (self.marker.len() + 2));

    if let Some(top) = &self.top {
      result.push_str(top);
      result.push('\n');
    }

    for line in header.lines() {
      result.push_str(&self.marker);
      if !is_blank(line) {
        result.push(' ');
        result.push_str(line);
      }
      result.push('\n');
    }

    if let Some(bottom) = &self.bottom {
      result.push_str(bottom);
      result.push('\n');
    }

    result
  }
}

/// Ordered mapping from file extension to renderer.
///
/// Lookup is an exact string match on the extension (leading dot included) and
/// the first registration wins.
#[derive(Debug, Default)]
pub struct RendererRegistry {
  entries: Vec<(String, Box<dyn HeaderRenderer>)>,
}

impl RendererRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// The built-in languages.
  pub fn builtin() -> Self {
    let mut registry = Self::new();
    registry.register_builtins();
    registry
  }

  /// Builtins plus the comment styles declared in `config`.
  ///
  /// Configured styles are registered first so they shadow a builtin for the
  /// same extension.
  pub fn with_config_styles(config: &Config) -> Self {
    let mut registry = Self::new();

    let mut extensions: Vec<_> = config.comment_styles.keys().collect();
    extensions.sort();
    for ext in extensions {
      let style = CommentStyle::from(&config.comment_styles[ext]);
      registry.register(ext.clone(), Box::new(style));
    }

    registry.register_builtins();
    registry
  }

  fn register_builtins(&mut self) {
    let go = CommentStyle::line("//");
    let script = CommentStyle::line("#");
    let erlang = CommentStyle::line("%%");
    let lua = CommentStyle::line("--");
    let block = CommentStyle::block("/*", " *", " */");

    self.register(".go", Box::new(go));
    for ext in [".ex", ".rb", ".py"] {
      self.register(ext, Box::new(script.clone()));
    }
    self.register(".erl", Box::new(erlang));
    self.register(".lua", Box::new(lua));
    for ext in [".js", ".java", ".css"] {
      self.register(ext, Box::new(block.clone()));
    }
  }

  /// Append a renderer for `ext`. An earlier registration for the same
  /// extension keeps winning lookups.
  pub fn register(&mut self, ext: impl Into<String>, renderer: Box<dyn HeaderRenderer>) {
    self.entries.push((ext.into(), renderer));
  }

  /// Find the renderer registered for `ext`.
  pub fn lookup(&self, ext: &str) -> Option<&dyn HeaderRenderer> {
    self
      .entries
      .iter()
      .find(|(registered, _)| registered == ext)
      .map(|(_, renderer)| renderer.as_ref())
  }

  /// Registered extensions in registration order.
  pub fn extensions(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(ext, _)| ext.as_str())
  }
}
