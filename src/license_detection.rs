//! # License Detection Module
//!
//! This module finds the leading comment block of a file and classifies it
//! against the expected header.
//!
//! Detection is purely textual: [`extract_header`] takes the block bounded by
//! the start and end tokens of a [`CommentStyle`], and [`validate_header`]
//! compares it line for line with the formatted template. The only tolerated
//! difference is a single line whose copyright year range is older than the
//! template's, which is reported as [`Category::Outdated`].

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::report::{Category, Violation};
use crate::templates::CommentStyle;

/// Matches a copyright year range such as `2019-2024`.
static YEAR_RANGE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\d{4}-(\d{4})").expect("year range regex must compile"));

/// The leading comment block taken from a file.
///
/// Lines keep their original line terminators so that a fix can remove them
/// from the file verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedHeader<'a> {
  start: usize,
  lines: Vec<&'a str>,
}

impl<'a> ExtractedHeader<'a> {
  pub fn lines(&self) -> &[&'a str] {
    &self.lines
  }

  pub const fn len(&self) -> usize {
    self.lines.len()
  }

  pub const fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Index range of the header within the file's line sequence.
  pub const fn span(&self) -> Range<usize> {
    self.start..self.start + self.lines.len()
  }
}

fn is_blank(line: &str) -> bool {
  line.trim().is_empty()
}

/// Strips the trailing line terminator (`\n` or `\r\n`).
pub fn strip_line_ending(line: &str) -> &str {
  let line = line.strip_suffix('\n').unwrap_or(line);
  line.strip_suffix('\r').unwrap_or(line)
}

/// Extracts the leading comment block from a file's lines.
///
/// Leading blank lines are skipped. The first non-blank line must contain the
/// start token to open a block; every following line is taken until one
/// containing the end token (inclusive). A first line that only carries the
/// end token forms a one-line block. Anything else means the file has no
/// header. A block that never closes is returned as collected so far.
pub fn extract_header<'a>(lines: &[&'a str], style: &CommentStyle) -> ExtractedHeader<'a> {
  let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
    return ExtractedHeader::default();
  };

  let opening = lines[first];
  if !opening.contains(style.start.as_str()) {
    if opening.contains(style.end.as_str()) {
      return ExtractedHeader {
        start: first,
        lines: vec![opening],
      };
    }
    return ExtractedHeader::default();
  }

  let mut header = vec![opening];
  for line in &lines[first + 1..] {
    header.push(*line);
    if line.contains(style.end.as_str()) {
      break;
    }
  }

  ExtractedHeader {
    start: first,
    lines: header,
  }
}

/// Returns the full year range and its closing year, if the line has one.
fn find_year_range(line: &str) -> Option<(&str, u32)> {
  let caps = YEAR_RANGE_REGEX.captures(line)?;
  let range = caps.get(0)?.as_str();
  let last_year = caps.get(1)?.as_str().parse().ok()?;
  Some((range, last_year))
}

/// Classifies an extracted header against the expected one.
///
/// Returns `None` when the header matches exactly.
pub fn validate_header(extracted: &ExtractedHeader<'_>, expected: &[String]) -> Option<Violation> {
  if extracted.is_empty() {
    return Some(Violation::new(Category::NoHeader, ""));
  }

  if extracted.len() != expected.len() {
    return Some(Violation::new(
      Category::LengthMismatch,
      format!("Found {} lines, expected {}", extracted.len(), expected.len()),
    ));
  }

  let mut mismatches = 0;
  let mut last_mismatch = 0;
  for (index, (found, wanted)) in extracted.lines().iter().zip(expected).enumerate() {
    if strip_line_ending(found) != wanted.as_str() {
      mismatches += 1;
      last_mismatch = index;
    }
  }

  match mismatches {
    0 => None,
    1 => Some(classify_single_mismatch(
      strip_line_ending(extracted.lines()[last_mismatch]),
      &expected[last_mismatch],
      last_mismatch,
    )),
    _ => Some(Violation::new(
      Category::InvalidHeader,
      format!("Found {} wrong lines out of {}", mismatches, expected.len()),
    )),
  }
}

fn classify_single_mismatch(found: &str, wanted: &str, index: usize) -> Violation {
  let (Some((found_range, found_year)), Some((wanted_range, wanted_year))) =
    (find_year_range(found), find_year_range(wanted))
  else {
    return Violation::new(
      Category::InvalidHeader,
      format!("Unexpected mismatch in line {}", index + 1),
    );
  };

  if found_year < wanted_year {
    Violation::new(
      Category::Outdated,
      format!("Found date {}, expected {}", found_range, wanted_range),
    )
  } else {
    Violation::new(
      Category::InvalidHeader,
      format!(
        "Found something similar to the date: {}, but it's not correct. Expected: {}",
        found_range, wanted_range
      ),
    )
  }
}
