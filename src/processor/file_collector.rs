//! # File Collector Module
//!
//! This module walks a configured root and yields the files whose headers
//! should be checked, honoring the root's extension list and ignore rules.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::RootConfig;

/// Walks one root directory.
///
/// Traversal is depth-first in file-name order and never follows symlinks.
/// The walk is lazy and starts over on every call to [`FileWalker::files`].
pub struct FileWalker {
  /// Directory to walk
  root: PathBuf,

  /// Directory that ignored directories are matched relative to
  base_path: PathBuf,

  /// Accepted extensions, each with a leading dot
  extensions: HashSet<String>,

  /// Normalized directory paths, relative to the base path, that exclude any
  /// directory whose path contains them
  ignored_dirs: Vec<String>,

  /// Substrings that exclude a directory
  ignored_dir_names: Vec<String>,

  /// Normalized files to skip
  ignored_files: HashSet<PathBuf>,
}

impl FileWalker {
  /// Creates a walker for `root`, whose paths are already resolved against
  /// `base_path`.
  pub fn new(root: &RootConfig, base_path: &Path) -> Self {
    let base_path = normalize_path(base_path);
    let ignored_dirs = root
      .ignore
      .dir_paths
      .iter()
      .map(|p| relative_to(&normalize_path(p), &base_path))
      .filter(|p| !p.is_empty())
      .collect();

    let extensions = root
      .file_extensions
      .iter()
      .map(|ext| {
        if ext.starts_with('.') {
          ext.clone()
        } else {
          format!(".{}", ext)
        }
      })
      .collect();

    Self {
      root: normalize_path(&root.dir),
      base_path,
      extensions,
      ignored_dirs,
      ignored_dir_names: root.ignore.dir_names.iter().filter(|n| !n.is_empty()).cloned().collect(),
      ignored_files: root.ignore.file_paths.iter().map(|p| normalize_path(p)).collect(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Iterates over the files to check under this root.
  ///
  /// Unreadable entries are logged and skipped.
  pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(&self.root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| !entry.file_type().is_dir() || !self.is_ignored_dir(entry.path()))
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
          warn!("Skipping unreadable entry: {}", e);
          None
        }
      })
      .filter(|entry| entry.file_type().is_file())
      .filter(|entry| self.accepts_file(entry))
      .map(DirEntry::into_path)
  }

  /// Checks whether a directory and its subtree are excluded.
  ///
  /// Both ignore lists are matched as substrings of the directory path
  /// relative to the base path.
  pub fn is_ignored_dir(&self, dir: &Path) -> bool {
    let dir = normalize_path(dir);
    let relative = relative_to(&dir, &self.base_path);

    if self.ignored_dirs.iter().any(|ignored| relative.contains(ignored.as_str())) {
      trace!("Skipping ignored directory: {}", dir.display());
      return true;
    }

    if self.ignored_dir_names.iter().any(|name| relative.contains(name.as_str())) {
      trace!("Skipping directory by name: {}", dir.display());
      return true;
    }

    false
  }

  fn accepts_file(&self, entry: &DirEntry) -> bool {
    let path = entry.path();

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return false;
    };
    if !self.extensions.contains(&format!(".{}", ext)) {
      return false;
    }

    if self.ignored_files.contains(&normalize_path(path)) {
      trace!("Skipping ignored file: {}", path.display());
      return false;
    }

    true
  }
}

/// Renders `path` relative to `base_path`, or whole when it lies outside.
fn relative_to(path: &Path, base_path: &Path) -> String {
  path.strip_prefix(base_path).unwrap_or(path).to_string_lossy().into_owned()
}

/// Lexically resolves `.` and `..` components without touching the
/// filesystem.
///
/// A `..` that cannot be resolved (nothing left to pop, or the previous
/// component is itself `..`) is kept.
///
/// # Examples
/// - `a/b/../c` -> `a/c`
/// - `./a/./b` -> `a/b`
/// - `../a` -> `../a`
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut components: Vec<Component<'_>> = Vec::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match components.last() {
        Some(Component::Normal(_)) => {
          components.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        _ => components.push(component),
      },
      _ => components.push(component),
    }
  }

  if components.is_empty() {
    return PathBuf::from(".");
  }

  components.iter().map(|c| c.as_os_str()).collect()
}
