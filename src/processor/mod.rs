//! # Processor Module
//!
//! This module contains the core functionality for checking license headers
//! across the configured roots and fixing the files that fail.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and atomic writing
//! - [`content_transformer`] - Computing fixed file content
//! - [`file_collector`] - Directory traversal with extension and ignore rules
//!
//! The [`Processor`] struct is the main entry point for all file operations,
//! orchestrating the submodules to provide a cohesive API.

mod content_transformer;
mod file_collector;
mod file_io;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
pub use content_transformer::{FixAction, HeaderFixer};
pub use file_collector::{FileWalker, normalize_path};
pub use file_io::FileIO;
use tracing::{debug, trace, warn};

use crate::config::{Config, RootConfig};
use crate::diff::DiffManager;
use crate::info_log;
use crate::license_detection::{extract_header, validate_header};
use crate::prompt::{Confirm, FIX_PROMPT};
use crate::report::{Category, Finding, display_path};
use crate::templates::{CommentStyle, TemplateManager};

/// A configured root together with its formatted expected header.
struct PreparedRoot {
  config: RootConfig,
  style: CommentStyle,
  expected: Arc<[String]>,
}

/// Result of the check pass.
#[derive(Debug, Default)]
pub struct CheckOutcome {
  /// Findings in traversal order
  pub findings: Vec<Finding>,
  /// Files that were read and validated
  pub files_checked: usize,
  /// Files that could not be read
  pub files_failed: usize,
}

/// Result of the fix pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixOutcome {
  /// Files rewritten (or that would be rewritten in dry-run mode)
  pub fixed: usize,
  /// Files that could not be fixed
  pub failed: usize,
}

/// Which findings the fix pass should rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixSelection {
  Nothing,
  All,
  Only(BTreeSet<Category>),
}

impl FixSelection {
  pub fn includes(&self, category: Category) -> bool {
    match self {
      Self::Nothing => false,
      Self::All => true,
      Self::Only(categories) => categories.contains(&category),
    }
  }

  /// The findings to fix, in their original order.
  pub fn select<'a>(&self, findings: &'a [Finding]) -> Vec<&'a Finding> {
    findings.iter().filter(|f| self.includes(f.category)).collect()
  }
}

/// Decides which findings get fixed.
///
/// Configured categories are fixed without asking. With none configured the
/// user is asked once, and a yes fixes every finding.
pub fn select_fixes(auto_fix: &BTreeSet<Category>, confirm: &mut dyn Confirm) -> Result<FixSelection> {
  if !auto_fix.is_empty() {
    return Ok(FixSelection::Only(auto_fix.clone()));
  }

  if confirm.confirm(FIX_PROMPT)? {
    Ok(FixSelection::All)
  } else {
    Ok(FixSelection::Nothing)
  }
}

/// Processor for checking and fixing license headers.
///
/// The `Processor` is responsible for:
/// - Walking every configured root
/// - Validating the leading comment block of each file
/// - Rewriting the headers of selected files
/// - Showing diffs of the rewrites
pub struct Processor {
  /// Directory report paths are shown relative to
  base_path: PathBuf,

  /// Roots in configuration order
  roots: Vec<PreparedRoot>,

  /// Whether to print every file as it is checked
  print_checking: bool,

  /// Whether to compute fixes without writing them
  dry_run: bool,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor for the given configuration.
  ///
  /// The expected header of every root is formatted once here.
  pub fn new(config: &Config, templates: &mut TemplateManager) -> Self {
    let roots = config
      .roots
      .iter()
      .map(|root| {
        let style = root.comment_style();
        let expected = templates.header_for(&style);
        PreparedRoot {
          config: root.clone(),
          style,
          expected,
        }
      })
      .collect();

    Self {
      base_path: normalize_path(&config.base_path),
      roots,
      print_checking: config.print_checking,
      dry_run: false,
      diff_manager: DiffManager::default(),
    }
  }

  #[must_use]
  pub fn with_diff_manager(mut self, diff_manager: DiffManager) -> Self {
    self.diff_manager = diff_manager;
    self
  }

  #[must_use]
  pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  pub const fn diff_manager(&self) -> &DiffManager {
    &self.diff_manager
  }

  /// Checks every file of every root, in configuration order.
  ///
  /// A file that cannot be read is reported, counted as failed, and skipped.
  pub fn check(&self) -> CheckOutcome {
    let start_time = std::time::Instant::now();
    let mut outcome = CheckOutcome::default();

    for (index, root) in self.roots.iter().enumerate() {
      let walker = FileWalker::new(&root.config, &self.base_path);
      debug!("Checking root: {}", walker.root().display());

      for path in walker.files() {
        if self.print_checking {
          info_log!("Checking {}...", display_path(&path, &self.base_path));
        }

        match self.check_file(&path, index) {
          Ok(finding) => {
            outcome.files_checked += 1;
            if let Some(finding) = finding {
              trace!("{}: {}", path.display(), finding.category);
              outcome.findings.push(finding);
            }
          }
          Err(e) => {
            warn!("Failed to check {}: {:#}", path.display(), e);
            outcome.files_failed += 1;
          }
        }
      }
    }

    debug!(
      "Checked {} files in {}ms, {} findings",
      outcome.files_checked,
      start_time.elapsed().as_millis(),
      outcome.findings.len()
    );
    outcome
  }

  /// Validates one file against the expected header of root `root_index`.
  ///
  /// # Returns
  ///
  /// `None` when the header matches.
  pub fn check_file(&self, path: &Path, root_index: usize) -> Result<Option<Finding>> {
    let root = self.root(root_index)?;
    let content = FileIO::read_full_content(path)?;
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let header = extract_header(&lines, &root.style);

    Ok(validate_header(&header, &root.expected).map(|violation| Finding::new(path.to_path_buf(), root_index, violation)))
  }

  /// Fixes the given findings, continuing past files that fail.
  pub fn fix<'a>(&self, findings: impl IntoIterator<Item = &'a Finding>) -> FixOutcome {
    let mut outcome = FixOutcome::default();

    for finding in findings {
      match self.fix_finding(finding) {
        Ok(()) => outcome.fixed += 1,
        Err(e) => {
          warn!("Failed to fix {}: {:#}", finding.path.display(), e);
          outcome.failed += 1;
        }
      }
    }

    outcome
  }

  /// Rewrites one file so it starts with the expected header.
  ///
  /// In dry-run mode the fix is only previewed.
  pub fn fix_finding(&self, finding: &Finding) -> Result<()> {
    let root = self.root(finding.root)?;
    let content = FileIO::read_full_content(&finding.path)?;
    let fixed = HeaderFixer::new(&root.style, &root.expected).apply(&content, finding.category);

    let shown = display_path(&finding.path, &self.base_path);
    self.diff_manager.display_diff(Path::new(&shown), &content, &fixed)?;

    if self.dry_run {
      debug!("Dry run: not writing {}", finding.path.display());
      return Ok(());
    }

    FileIO::write_file(&finding.path, &fixed)?;
    trace!("Fixed {} ({:?})", finding.path.display(), FixAction::for_category(finding.category));
    Ok(())
  }

  fn root(&self, index: usize) -> Result<&PreparedRoot> {
    self
      .roots
      .get(index)
      .ok_or_else(|| anyhow::anyhow!("No configured root with index {}", index))
  }
}
