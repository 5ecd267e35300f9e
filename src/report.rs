//! # Report Module
//!
//! This module defines the finding categories produced by header validation
//! and persists findings to disk.
//!
//! Every run writes one flat text file per category into the report folder
//! (`NO_LICENSE.txt`, `OUTDATED.txt`, ...), each line formatted as
//! `<path>: <category message>. <detail>.`. A JSON report with a summary can
//! be written in addition.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

/// Classification of a header that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
  /// The header differs from the template in a way that is not an outdated
  /// year.
  #[serde(rename = "INVALID_LICENSE")]
  InvalidHeader,
  /// The file does not start with a comment block.
  #[serde(rename = "NO_LICENSE")]
  NoHeader,
  /// The only difference is an older copyright year range.
  #[serde(rename = "OUTDATED")]
  Outdated,
  /// The comment block has a different number of lines than the template.
  #[serde(rename = "LEN_MISMATCH")]
  LengthMismatch,
}

impl Category {
  /// All categories, in report order.
  pub const ALL: [Self; 4] = [Self::InvalidHeader, Self::NoHeader, Self::Outdated, Self::LengthMismatch];

  /// Identifier used in configuration files and report file names.
  pub const fn name(self) -> &'static str {
    match self {
      Self::InvalidHeader => "INVALID_LICENSE",
      Self::NoHeader => "NO_LICENSE",
      Self::Outdated => "OUTDATED",
      Self::LengthMismatch => "LEN_MISMATCH",
    }
  }

  /// Human-readable description used in report lines.
  pub const fn message(self) -> &'static str {
    match self {
      Self::InvalidHeader => "Detected license is invalid",
      Self::NoHeader => "The license was not found",
      Self::Outdated => "Detected license is outdated",
      Self::LengthMismatch => "Detected license length does not match pattern",
    }
  }

  /// Comma-separated list of every accepted category name.
  pub fn names() -> String {
    Self::ALL.iter().map(|c| format!("\"{}\"", c.name())).collect::<Vec<_>>().join(", ")
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Error returned when parsing a string into a Category fails
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown category \"{0}\". Possible values: {names}", names = Category::names())]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
  type Err = ParseCategoryError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|category| category.name() == s)
      .ok_or_else(|| ParseCategoryError(s.to_string()))
  }
}

/// The outcome of a failed validation, before it is tied to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
  pub category: Category,
  pub detail: String,
}

impl Violation {
  pub fn new(category: Category, detail: impl Into<String>) -> Self {
    Self {
      category,
      detail: detail.into(),
    }
  }
}

/// A recorded validation failure for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  pub category: Category,
  pub detail: String,
  /// Index of the configured root the file was found under
  #[serde(skip)]
  pub root: usize,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

impl Finding {
  pub fn new(path: PathBuf, root: usize, violation: Violation) -> Self {
    Self {
      path,
      category: violation.category,
      detail: violation.detail,
      root,
    }
  }

  /// Formats the report line for this finding, showing the path relative to
  /// `base_path` when possible.
  ///
  /// The line is always `<path>: <message>. <detail>.`, even when the detail
  /// is empty.
  pub fn report_line(&self, base_path: &Path) -> String {
    let path = display_path(&self.path, base_path);
    format!("{}: {}. {}.", path, self.category.message(), self.detail)
  }
}

/// Renders `path` relative to `base_path`, falling back to the path itself.
pub fn display_path(path: &Path, base_path: &Path) -> String {
  if let Ok(stripped) = path.strip_prefix(base_path) {
    return stripped.to_string_lossy().to_string();
  }

  match pathdiff::diff_paths(path, base_path) {
    Some(relative) if !relative.starts_with("..") => relative.to_string_lossy().to_string(),
    _ => path.to_string_lossy().to_string(),
  }
}

/// Counts gathered over one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  pub files_checked: usize,
  pub files_with_findings: usize,
  pub files_fixed: usize,
  pub files_failed: usize,
  pub by_category: BTreeMap<Category, usize>,
  #[serde(rename = "processing_time_seconds", serialize_with = "serialize_duration")]
  pub processing_time: Duration,
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_f64(duration.as_secs_f64())
}

impl ProcessingSummary {
  pub fn from_findings(files_checked: usize, findings: &[Finding], processing_time: Duration) -> Self {
    let mut by_category: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for finding in findings {
      *by_category.entry(finding.category).or_default() += 1;
    }

    Self {
      files_checked,
      files_with_findings: findings.len(),
      by_category,
      processing_time,
      ..Self::default()
    }
  }

  pub fn count(&self, category: Category) -> usize {
    self.by_category.get(&category).copied().unwrap_or(0)
  }
}

/// Writes per-category report files into a folder.
pub struct ReportWriter<'a> {
  /// Folder receiving the report files
  folder: &'a Path,
  /// Paths in report lines are shown relative to this directory
  base_path: &'a Path,
}

impl<'a> ReportWriter<'a> {
  pub const fn new(folder: &'a Path, base_path: &'a Path) -> Self {
    Self { folder, base_path }
  }

  /// Path of the report file for `category`.
  pub fn report_path(&self, category: Category) -> PathBuf {
    self.folder.join(format!("{}.txt", category.name()))
  }

  /// Writes one file per category, creating the folder if needed.
  ///
  /// Every category gets a file, empty when it has no findings, so stale
  /// reports from earlier runs never survive.
  pub fn write(&self, findings: &[Finding]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(self.folder)
      .with_context(|| format!("Failed to create report folder {}", self.folder.display()))?;

    let mut written = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
      let mut content = String::new();
      for finding in findings.iter().filter(|f| f.category == category) {
        content.push_str(&finding.report_line(self.base_path));
        content.push('\n');
      }

      let path = self.report_path(category);
      fs::write(&path, content).with_context(|| format!("Failed to write report to {}", path.display()))?;
      debug!("Wrote report {}", path.display());
      written.push(path);
    }

    Ok(written)
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  findings: &'a [Finding],
}

/// Writes the findings and summary as a JSON document.
pub fn write_json_report(output_path: &Path, findings: &[Finding], summary: &ProcessingSummary) -> Result<()> {
  let content = serde_json::to_string_pretty(&JsonReport { summary, findings })
    .with_context(|| "Failed to serialize JSON report")?;

  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
