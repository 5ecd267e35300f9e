//! # Diff Module
//!
//! This module renders the change a header fix makes to a file, so fixes can
//! be previewed on stderr or collected into a patch-like file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Renders and records diffs of header fixes.
///
/// This struct handles:
/// - Generating line diffs between original and fixed content
/// - Displaying diffs to stderr with colorization
/// - Appending diffs to a file
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that diffs are appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager.
  ///
  /// # Parameters
  ///
  /// * `show_diff` - Whether to print diffs to stderr
  /// * `save_diff_path` - File that diffs are appended to
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output is requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts from an empty file.
  pub fn reset(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      std::fs::write(diff_path, "").with_context(|| format!("Failed to create diff file {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Displays and/or saves the diff between the original and fixed content.
  ///
  /// Diffs from several files are appended to the same diff file, one block
  /// per file.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file being fixed
  /// * `original` - Original file content
  /// * `new` - Content with the expected header
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let diff_content = render_diff(path, original, new);

    if self.show_diff {
      for line in diff_content.lines() {
        if line.starts_with('+') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
        } else if line.starts_with('-') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
        } else {
          eprintln!("{}", line);
        }
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff file {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Builds the textual diff block for one file.
///
/// Every line is prefixed with `+`, `-` or a space. The block starts with a
/// `Diff for <path>:` line and ends with an empty line.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);
  let mut diff_content = format!("Diff for {}:\n", path.display());

  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    diff_content.push_str(sign);
    diff_content.push_str(change.value());
    if change.missing_newline() {
      diff_content.push('\n');
    }
  }

  diff_content.push('\n');
  diff_content
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_render_diff_marks_inserted_header() {
    let rendered = render_diff(Path::new("a.py"), "print(1)\n", "# header\nprint(1)\n");

    assert_eq!(rendered, "Diff for a.py:\n+# header\n print(1)\n\n");
  }

  #[test]
  fn test_render_diff_without_trailing_newline() {
    let rendered = render_diff(Path::new("b.py"), "x", "# h\nx");

    assert!(rendered.contains("+# h\n"));
    assert!(rendered.ends_with(" x\n\n"));
  }

  #[test]
  fn test_save_diff_appends_blocks() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let diff_path = temp_dir.path().join("fixes.diff");
    let manager = DiffManager::new(false, Some(diff_path.clone()));

    manager.reset().expect("reset diff file");
    manager
      .display_diff(Path::new("one.rs"), "a\n", "h\na\n")
      .expect("first diff");
    manager
      .display_diff(Path::new("two.rs"), "b\n", "h\nb\n")
      .expect("second diff");

    let saved = std::fs::read_to_string(&diff_path).expect("read diff file");
    assert!(saved.contains("Diff for one.rs:"));
    assert!(saved.contains("Diff for two.rs:"));
    assert_eq!(saved.matches("+h\n").count(), 2);
  }

  #[test]
  fn test_disabled_manager_writes_nothing() {
    let manager = DiffManager::default();
    assert!(!manager.is_enabled());
    manager
      .display_diff(Path::new("x"), "a\n", "b\n")
      .expect("disabled diff is a no-op");
  }
}
