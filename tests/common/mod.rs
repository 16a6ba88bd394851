#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use tempfile::TempDir;

pub const TEMPLATE: &str = "Copyright {{.Year}} {{.Owner}}\nLicensed under the MIT License.\n";

/// A scratch project: a template, a `.header.cfg` and a `src/` tree.
pub struct Fixture {
  pub dir: TempDir,
}

impl Fixture {
  /// Creates a project with the default template and a config walking
  /// `src/` with `Year` pinned to 2024 and `Owner` set to `ACME`.
  pub fn new() -> Result<Self> {
    Self::with_config(
      r#"{
  "Dir": "src",
  "Template": "header.tmpl",
  "Excludes": [],
  "UseDefaultExcludes": true,
  "Properties": { "Year": "2024", "Owner": "ACME" }
}"#,
    )
  }

  /// Creates a project with the default template and the given config text.
  pub fn with_config(config: &str) -> Result<Self> {
    let dir = TempDir::new()?;
    fs::create_dir_all(dir.path().join("src"))?;
    fs::write(dir.path().join("header.tmpl"), TEMPLATE)?;
    fs::write(dir.path().join(".header.cfg"), config)?;
    Ok(Self { dir })
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  pub fn src(&self) -> PathBuf {
    self.dir.path().join("src")
  }

  /// Writes `content` to `rel` under `src/`, creating parent directories.
  pub fn write_src(&self, rel: &str, content: &str) -> Result<PathBuf> {
    let path = self.src().join(rel);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
  }

  pub fn read_src(&self, rel: &str) -> Result<String> {
    Ok(fs::read_to_string(self.src().join(rel))?)
  }

  /// The binary, run from the project root with a clean environment.
  pub fn headstamp(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("headstamp")?;
    cmd
      .current_dir(self.root())
      .env_remove("HEADSTAMP_CONFIG")
      .env_remove("RUST_LOG");
    Ok(cmd)
  }
}

/// The header the default template renders to for a line-comment marker.
pub fn line_header(marker: &str) -> String {
  format!("{marker} Copyright 2024 ACME\n{marker} Licensed under the MIT License.\n{marker} \n")
}
