//! # Templates Module
//!
//! This module loads the license template and wraps it in the comment tokens
//! of a [`CommentStyle`], producing the exact header every checked file is
//! expected to start with.
//!
//! The module includes:
//! - [`LicenseTemplate`] for the raw license body
//! - [`CommentStyle`] for the start/end/prefix tokens of a root
//! - [`format_header`] for building the expected header lines
//! - [`TemplateManager`] for caching formatted headers per comment style
//!
//! ## Example
//!
//! ```rust
//! use license_checker::templates::{CommentStyle, LicenseTemplate, format_header};
//!
//! let template = LicenseTemplate::from_text("Copyright 2019-2024 Example Corp\n\nAll rights reserved.\n");
//! let style = CommentStyle::new("/*", " */", " *");
//!
//! let header = format_header(&template, &style);
//! assert_eq!(
//!   header,
//!   vec!["/*", " * Copyright 2019-2024 Example Corp", " *", " * All rights reserved.", " *", " */"]
//! );
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

/// Error type for license template loading.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The template file could not be read.
  #[error("Failed to read license template '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The template file has no content.
  #[error("License template '{path}' is empty")]
  Empty { path: PathBuf },
}

/// The canonical license text, independent of comment syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTemplate {
  lines: Vec<String>,
}

impl LicenseTemplate {
  /// Loads a license template from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or contains only whitespace.
  pub fn load(path: &Path) -> Result<Self, TemplateError> {
    debug!("Loading license template from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| TemplateError::ReadError {
      path: path.to_path_buf(),
      source,
    })?;

    if content.trim().is_empty() {
      return Err(TemplateError::Empty {
        path: path.to_path_buf(),
      });
    }

    Ok(Self::from_text(&content))
  }

  /// Builds a template from in-memory text.
  pub fn from_text(text: &str) -> Self {
    Self {
      lines: text.lines().map(str::to_string).collect(),
    }
  }

  /// The raw template lines, without line terminators.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}

/// The comment tokens used to wrap the template for one configured root.
///
/// # Fields
///
/// * `start` - Line that opens the header block (e.g., "/*")
/// * `end` - Line that closes the header block (e.g., " */")
/// * `prefix` - Marker placed before every template line (e.g., " *")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentStyle {
  pub start: String,
  pub end: String,
  pub prefix: String,
}

impl CommentStyle {
  pub fn new(start: &str, end: &str, prefix: &str) -> Self {
    Self {
      start: start.to_string(),
      end: end.to_string(),
      prefix: prefix.to_string(),
    }
  }
}

/// Formats the template with the given comment style.
///
/// The result is the start token, one line per template line (a bare prefix
/// for blank lines, `prefix + " " + trimmed line` otherwise), a closing bare
/// prefix, and the end token. Lines carry no newline characters.
pub fn format_header(template: &LicenseTemplate, style: &CommentStyle) -> Vec<String> {
  let mut header = Vec::with_capacity(template.lines().len() + 3);
  header.push(style.start.clone());

  for line in template.lines() {
    let trimmed = line.trim();
    if trimmed.is_empty() {
      header.push(style.prefix.clone());
    } else {
      header.push(format!("{} {}", style.prefix, trimmed));
    }
  }

  header.push(style.prefix.clone());
  header.push(style.end.clone());
  header
}

/// Owns the license template and hands out formatted headers, computing each
/// comment style's header once.
pub struct TemplateManager {
  template: LicenseTemplate,
  headers: HashMap<CommentStyle, Arc<[String]>>,
}

impl TemplateManager {
  pub fn new(template: LicenseTemplate) -> Self {
    Self {
      template,
      headers: HashMap::new(),
    }
  }

  /// Loads the template file and wraps it in a new manager.
  pub fn load_template(path: &Path) -> Result<Self, TemplateError> {
    LicenseTemplate::load(path).map(Self::new)
  }

  /// Returns the expected header for `style`, formatting it on first use.
  pub fn header_for(&mut self, style: &CommentStyle) -> Arc<[String]> {
    if let Some(header) = self.headers.get(style) {
      return Arc::clone(header);
    }

    let header: Arc<[String]> = format_header(&self.template, style).into();
    debug!("Formatted {}-line header for start token {:?}", header.len(), style.start);
    self.headers.insert(style.clone(), Arc::clone(&header));
    header
  }
}
