//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Returns
  ///
  /// The complete file content as a String.
  pub fn read_full_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replace file content atomically.
  ///
  /// The content goes to a temporary file in the same directory, which is then
  /// renamed over `path`. The original permissions are kept.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut staging =
      NamedTempFile::new_in(parent).with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    staging
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write file: {}", path.display()))?;
    staging
      .as_file()
      .sync_all()
      .with_context(|| format!("Failed to sync file: {}", path.display()))?;

    if let Ok(metadata) = fs::metadata(path) {
      fs::set_permissions(staging.path(), metadata.permissions())
        .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }

    staging
      .persist(path)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_write_file_replaces_content() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("file.py");
    fs::write(&path, "old\n").expect("write file");

    FileIO::write_file(&path, "new\n").expect("write should succeed");

    assert_eq!(FileIO::read_full_content(&path).expect("read"), "new\n");
    let leftovers = fs::read_dir(temp_dir.path()).expect("read dir").count();
    assert_eq!(leftovers, 1);
  }

  #[cfg(unix)]
  #[test]
  fn test_write_file_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("script.sh");
    fs::write(&path, "echo hi\n").expect("write file");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("set permissions");

    FileIO::write_file(&path, "# header\necho hi\n").expect("write should succeed");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
  }

  #[test]
  fn test_read_missing_file_has_path_context() {
    let err = FileIO::read_full_content(Path::new("/nonexistent/file.py")).expect_err("should fail");
    assert!(err.to_string().contains("/nonexistent/file.py"));
  }
}
