//! # Configuration Module
//!
//! This module loads the run configuration: the root directory to walk, the
//! header template, the template properties, and the exclusion rules.
//!
//! Configuration lives in a `.header.cfg` JSON file in the current directory,
//! or in the file named by the `--config` flag or the `HEADSTAMP_CONFIG`
//! environment variable. Files ending in `.toml` are read as TOML with the
//! same keys.
//!
//! ```json
//! {
//!   "Dir": "./",
//!   "Template": "./header.tmpl",
//!   "Excludes": ["vendor", "*.pb.go"],
//!   "UseDefaultExcludes": true,
//!   "Properties": { "Owner": "ACME Corp" }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::exclude::{clean_path, to_slash};

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".header.cfg";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADSTAMP_CONFIG";

/// User-defined comment style for one extension.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CommentStyleConfig {
  /// Line opening a block comment (e.g. "/*"). Empty for line comments.
  #[serde(default)]
  pub top: String,

  /// Marker starting each header line (e.g. "//" or " *").
  pub middle: String,

  /// Line closing a block comment (e.g. " */"). Empty for line comments.
  #[serde(default)]
  pub bottom: String,
}

impl CommentStyleConfig {
  /// Create a new line-comment style (no top/bottom markers).
  pub fn line(marker: &str) -> Self {
    Self {
      top: String::new(),
      middle: marker.to_string(),
      bottom: String::new(),
    }
  }

  /// Create a new block-comment style.
  pub fn block(top: &str, middle: &str, bottom: &str) -> Self {
    Self {
      top: top.to_string(),
      middle: middle.to_string(),
      bottom: bottom.to_string(),
    }
  }
}

/// The run configuration.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
  /// Root directory to walk. Relative paths resolve against the working
  /// directory.
  #[serde(default)]
  pub dir: PathBuf,

  /// Path to the header template file.
  #[serde(default)]
  pub template: PathBuf,

  /// Extensions to restrict processing to (leading dot included). Empty
  /// means every extension with a renderer.
  #[serde(default)]
  pub adapter: Vec<String>,

  /// Glob patterns for paths to skip.
  #[serde(default)]
  pub excludes: Vec<String>,

  /// Whether to append the built-in default excludes.
  #[serde(default)]
  pub use_default_excludes: bool,

  /// Values substituted into the template.
  #[serde(default)]
  pub properties: HashMap<String, String>,

  /// Extra comment styles keyed by extension (leading dot included).
  #[serde(default)]
  pub comment_styles: HashMap<String, CommentStyleConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Loads configuration error, caused by: failed to read '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid JSON.
  #[error("Parses configuration error, caused by: '{path}': {source}")]
  ParseJson { path: PathBuf, source: serde_json::Error },

  /// The config file contains invalid TOML.
  #[error("Parses configuration error, caused by: '{path}': {source}")]
  ParseToml { path: PathBuf, source: toml::de::Error },

  /// A required field is missing or empty.
  #[error("Configuration field '{0}' is required")]
  MissingField(&'static str),

  /// An extension key is malformed.
  #[error("Invalid extension '{extension}': {message}")]
  InvalidExtension { extension: String, message: String },

  /// A comment style configuration is invalid.
  #[error("Invalid comment style for '{extension}': {message}")]
  InvalidCommentStyle { extension: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// The format is picked from the extension: `.toml` is TOML, anything else
  /// is JSON.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config: Config = if is_toml {
      toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: e,
      })?
    } else {
      serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
        path: path.to_path_buf(),
        source: e,
      })?
    };

    config.validate()?;

    debug!(
      "Loaded config: dir={}, template={}, {} excludes, {} properties",
      config.dir.display(),
      config.template.display(),
      config.excludes.len(),
      config.properties.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `Dir` and `Template` are set
  /// - Extensions in `Adapter` and `CommentStyles` start with a dot
  /// - Every comment style has a non-empty `Middle`
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.dir.as_os_str().is_empty() {
      return Err(ConfigError::MissingField("Dir"));
    }
    if self.template.as_os_str().is_empty() {
      return Err(ConfigError::MissingField("Template"));
    }

    for ext in &self.adapter {
      if !ext.starts_with('.') {
        return Err(ConfigError::InvalidExtension {
          extension: ext.clone(),
          message: "extension must include the leading dot".to_string(),
        });
      }
    }

    for (ext, style) in &self.comment_styles {
      if !ext.starts_with('.') {
        return Err(ConfigError::InvalidCommentStyle {
          extension: ext.clone(),
          message: "extension must include the leading dot".to_string(),
        });
      }

      if style.middle.is_empty() {
        return Err(ConfigError::InvalidCommentStyle {
          extension: ext.clone(),
          message: "Middle field cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }

  /// Absolute, lexically cleaned root directory.
  pub fn resolve_root(&self, cwd: &Path) -> PathBuf {
    PathBuf::from(clean_path(&to_slash(&absolutize(&self.dir, cwd))))
  }

  /// Template path resolved against `cwd`.
  pub fn resolve_template(&self, cwd: &Path) -> PathBuf {
    absolutize(&self.template, cwd)
  }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    cwd.join(path)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADSTAMP_CONFIG` environment variable
/// 3. `.header.cfg` in the current directory
pub fn discover_config_path(explicit_path: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  if let Some(path) = explicit_path {
    if path.exists() {
      debug!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    debug!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check the working directory
  let default_config = cwd.join(DEFAULT_CONFIG_FILENAME);
  if default_config.exists() {
    debug!("Using config: {}", default_config.display());
    return Some(default_config);
  }

  None
}

/// Find and load the configuration.
///
/// # Errors
///
/// Fails when no configuration file can be found, or when the one found
/// cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<&Path>, cwd: &Path) -> Result<Config> {
  let path = discover_config_path(explicit_path, cwd).with_context(|| match explicit_path {
    Some(path) => format!("Loads configuration error, caused by: {} not found", path.display()),
    None => format!(
      "Loads configuration error, caused by: no {} in {}",
      DEFAULT_CONFIG_FILENAME,
      cwd.display()
    ),
  })?;

  let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
  Ok(config)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  const VALID_JSON: &str = r#"{
    "Dir": "./src",
    "Template": "./header.tmpl",
    "Adapter": [".go"],
    "Excludes": ["vendor", "*.pb.go"],
    "UseDefaultExcludes": true,
    "Properties": { "Owner": "xiaobo", "Year": "2006-2019" }
  }"#;

  #[test]
  fn test_parse_valid_json_config() {
    let config: Config = serde_json::from_str(VALID_JSON).expect("valid config should parse");

    assert_eq!(config.dir, PathBuf::from("./src"));
    assert_eq!(config.template, PathBuf::from("./header.tmpl"));
    assert_eq!(config.adapter, vec![".go"]);
    assert_eq!(config.excludes, vec!["vendor", "*.pb.go"]);
    assert!(config.use_default_excludes);
    assert_eq!(config.properties.get("Owner").map(String::as_str), Some("xiaobo"));
    assert!(config.comment_styles.is_empty());
  }

  #[test]
  fn test_parse_minimal_config_defaults() {
    let config: Config = serde_json::from_str(r#"{"Dir": ".", "Template": "t"}"#).expect("should parse");

    assert!(config.excludes.is_empty());
    assert!(!config.use_default_excludes);
    assert!(config.properties.is_empty());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_parse_comment_styles() {
    let config: Config = serde_json::from_str(
      r#"{"Dir": ".", "Template": "t",
          "CommentStyles": {".rs": {"Middle": "//"}, ".c": {"Top": "/*", "Middle": " *", "Bottom": " */"}}}"#,
    )
    .expect("should parse");

    assert_eq!(config.comment_styles.get(".rs"), Some(&CommentStyleConfig::line("//")));
    assert_eq!(
      config.comment_styles.get(".c"),
      Some(&CommentStyleConfig::block("/*", " *", " */"))
    );
  }

  #[test]
  fn test_validate_missing_dir() {
    let config = Config {
      template: PathBuf::from("t"),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::MissingField("Dir"))));
  }

  #[test]
  fn test_validate_missing_template() {
    let config = Config {
      dir: PathBuf::from("."),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::MissingField("Template"))));
  }

  #[test]
  fn test_validate_comment_style_without_dot() {
    let mut config = Config {
      dir: PathBuf::from("."),
      template: PathBuf::from("t"),
      ..Config::default()
    };
    config.comment_styles.insert("rs".to_string(), CommentStyleConfig::line("//"));

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidCommentStyle { .. }));
  }

  #[test]
  fn test_validate_empty_middle() {
    let mut config = Config {
      dir: PathBuf::from("."),
      template: PathBuf::from("t"),
      ..Config::default()
    };
    config.comment_styles.insert(".rs".to_string(), CommentStyleConfig::line(""));

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidCommentStyle { .. }));
  }

  #[test]
  fn test_validate_adapter_without_dot() {
    let config = Config {
      dir: PathBuf::from("."),
      template: PathBuf::from("t"),
      adapter: vec!["go".to_string()],
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidExtension { .. }));
  }

  #[test]
  fn test_load_json_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, VALID_JSON).expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.excludes.len(), 2);
  }

  #[test]
  fn test_load_toml_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("header.toml");
    std::fs::write(
      &config_path,
      concat!(
        "Dir = \".\"\n",
        "Template = \"header.tmpl\"\n",
        "Excludes = [\"vendor\"]\n",
        "\n",
        "[Properties]\n",
        "Owner = \"ACME\"\n",
      ),
    )
    .expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.excludes, vec!["vendor"]);
    assert_eq!(config.properties.get("Owner").map(String::as_str), Some("ACME"));
  }

  #[test]
  fn test_load_malformed_json() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "{ not json").expect("write config");

    let err = Config::load(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::ParseJson { .. }));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.header.cfg"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom.json");
    std::fs::write(&config_path, "{}").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_in_cwd() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "{}").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_none_found() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.cfg");
    let err = load_config(Some(&missing), temp_dir.path()).expect_err("should fail");
    assert!(err.to_string().contains("Loads configuration error"));
  }

  #[test]
  fn test_resolve_root() {
    let config = Config {
      dir: PathBuf::from("./src/../lib"),
      ..Config::default()
    };
    assert_eq!(config.resolve_root(Path::new("/work")), PathBuf::from("/work/lib"));

    let absolute = Config {
      dir: PathBuf::from("/abs/dir/"),
      ..Config::default()
    };
    assert_eq!(absolute.resolve_root(Path::new("/work")), PathBuf::from("/abs/dir"));
  }

  #[test]
  fn test_resolve_template() {
    let config = Config {
      template: PathBuf::from("header.tmpl"),
      ..Config::default()
    };
    assert_eq!(
      config.resolve_template(Path::new("/work")),
      PathBuf::from("/work/header.tmpl")
    );
  }
}
