//! # Content Transformer Module
//!
//! This module computes the fixed content of a file from its current content.
//! It never touches the filesystem, so a fix can be previewed before it is
//! written.

use tracing::trace;

use crate::license_detection::extract_header;
use crate::report::Category;
use crate::templates::CommentStyle;

/// What a fix does to a file's existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixAction {
  /// Put the expected header in front of the unchanged content.
  Prepend,
  /// Swap the existing leading comment block for the expected header.
  Replace,
}

impl FixAction {
  pub const fn for_category(category: Category) -> Self {
    match category {
      Category::NoHeader => Self::Prepend,
      Category::InvalidHeader | Category::Outdated | Category::LengthMismatch => Self::Replace,
    }
  }
}

/// Rewrites file content so it starts with the expected header.
pub struct HeaderFixer<'a> {
  style: &'a CommentStyle,
  expected: &'a [String],
}

impl<'a> HeaderFixer<'a> {
  pub const fn new(style: &'a CommentStyle, expected: &'a [String]) -> Self {
    Self { style, expected }
  }

  /// Returns the fixed content for a file reported under `category`.
  ///
  /// For a replacement the header is extracted again from `content`, and
  /// exactly the extracted lines are removed. Lines before the block (blank
  /// lines skipped by extraction) and everything after it are kept in order.
  pub fn apply(&self, content: &str, category: Category) -> String {
    let mut fixed: String = self.expected.iter().map(|line| format!("{}\n", line)).collect();

    match FixAction::for_category(category) {
      FixAction::Prepend => fixed.push_str(content),
      FixAction::Replace => {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let span = extract_header(&lines, self.style).span();
        trace!("Replacing header lines {}..{}", span.start, span.end);

        for line in lines[..span.start].iter().chain(&lines[span.end..]) {
          fixed.push_str(line);
        }
      }
    }

    fixed
  }
}
