//! # Output Module
//!
//! This module centralizes all user-facing output for the license checker.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! Progress and results go to stdout and are silenced by `-q`, except the
//! finding list which is still printed in quiet mode (one path per line) so
//! it can be piped. Failures go to stderr.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{Category, Finding, ProcessingSummary, display_path};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print the "Checking files..." message.
pub fn print_start_message() {
  if !is_quiet() {
    println!("Checking files...");
  }
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the findings grouped by category, in report order.
///
/// In quiet mode only the file paths are printed.
pub fn print_findings(findings: &[Finding], base_path: &Path) {
  if is_quiet() {
    for finding in findings {
      println!("{}", display_path(&finding.path, base_path));
    }
    return;
  }

  for (category, group) in group_by_category(findings) {
    println!(
      "{} {} ({}):",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      category.message(),
      group.len()
    );
    for finding in group {
      println!("  {}", finding.report_line(base_path));
    }
  }
}

/// Groups findings by category, in report order, skipping empty groups.
pub fn group_by_category(findings: &[Finding]) -> Vec<(Category, Vec<&Finding>)> {
  Category::ALL
    .into_iter()
    .map(|category| (category, findings.iter().filter(|f| f.category == category).collect::<Vec<_>>()))
    .filter(|(_, group)| !group.is_empty())
    .collect()
}

/// Print the number of findings.
pub fn print_finding_count(count: usize) {
  if is_quiet() {
    return;
  }

  let message = format!("{} invalid licenses were found.", count);
  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.red()));
}

/// Print where the reports are saved.
pub fn print_report_folder(folder: &Path) {
  if !is_quiet() {
    println!("Saving reports in {}", folder.display());
  }
}

/// Print the notice before fixing the configured categories.
pub fn print_fixing_selected(categories: &[Category]) {
  if is_quiet() {
    return;
  }

  if is_verbose() {
    let names: Vec<&str> = categories.iter().map(|c| c.name()).collect();
    println!("Fixing selected files ({})...", names.join(", "));
  } else {
    println!("Fixing selected files...");
  }
}

/// Print the notice before fixing every finding.
pub fn print_fixing_all(count: usize) {
  if !is_quiet() {
    println!("Fixing all {} files...", count);
  }
}

/// Print the number of fixed files.
pub fn print_fixed(count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let symbol = symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow());
  if dry_run {
    println!("{} Would fix {} {} (dry run).", symbol, count, plural(count));
  } else {
    println!("{} Fixed {} files.", symbol, count);
  }
}

/// Print the success message when every header matches.
pub fn print_all_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All licenses are ok.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X checked, Y invalid, Z failed"
/// In verbose mode, also shows timing and per-category counts.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let invalid = summary.files_with_findings;
  let invalid_str = if invalid > 0 {
    invalid.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    invalid.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  let mut summary_line = format!(
    "Summary: {} checked, {} invalid, {} failed",
    summary.files_checked.if_supports_color(Stream::Stdout, |s| s.cyan()),
    invalid_str,
    summary.files_failed.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);

  if is_verbose() {
    for (category, count) in &summary.by_category {
      println!("  {}: {}", category, count);
    }
  }
}

/// Print a failure count to stderr.
pub fn print_failures(count: usize, action: &str) {
  if count == 0 {
    return;
  }

  let message = format!("{} {} could not be {}", count, plural(count), action);
  eprintln!(
    "{} {}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Print a fatal error to stderr.
pub fn print_error(error: &anyhow::Error) {
  eprintln!(
    "{} {:#}",
    "ERROR:".if_supports_color(Stream::Stderr, |s| s.red()),
    error
  );
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::report::Violation;

  fn finding(path: &str, category: Category) -> Finding {
    Finding::new(PathBuf::from(path), 0, Violation::new(category, ""))
  }

  #[test]
  fn test_group_by_category_uses_report_order() {
    let findings = vec![
      finding("a", Category::Outdated),
      finding("b", Category::NoHeader),
      finding("c", Category::Outdated),
    ];

    let groups = group_by_category(&findings);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, Category::NoHeader);
    assert_eq!(groups[1].0, Category::Outdated);
    assert_eq!(groups[1].1.len(), 2);
  }

  #[test]
  fn test_group_by_category_empty() {
    assert!(group_by_category(&[]).is_empty());
  }

  #[test]
  fn test_plural() {
    assert_eq!(plural(1), "file");
    assert_eq!(plural(0), "files");
    assert_eq!(plural(2), "files");
  }
}
