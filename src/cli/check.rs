//! # Check Command
//!
//! This module implements the check command for license headers.
//! This is the default command when no subcommand is specified.
//!
//! The command loads the configuration and template, checks every configured
//! root, writes the category reports, and then fixes the selected findings.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::config::{Config, load_config};
use crate::diff::DiffManager;
use crate::logging::{ColorMode, init_tracing, is_verbose, set_quiet, set_verbose};
use crate::output::{
  print_all_ok, print_blank_line, print_error, print_failures, print_finding_count, print_findings, print_fixed,
  print_fixing_all, print_fixing_selected, print_hint, print_report_folder, print_start_message, print_summary,
};
use crate::processor::{FixSelection, Processor, select_fixes};
use crate::prompt::{AssumeYes, Confirm, TerminalConfirm};
use crate::report::{Finding, ProcessingSummary, ReportWriter, write_json_report};
use crate::templates::TemplateManager;

/// Exit code when `--check` finds invalid headers or a file could not be
/// read or fixed.
pub const EXIT_FINDINGS: u8 = 1;

/// Exit code for configuration and template errors.
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Path to config file (default: license-checker.json or
  /// license-checker.toml in the current directory)
  #[arg(long, short = 'c', value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Only check: never prompt and never fix; exit with code 1 when any
  /// header is invalid
  #[arg(long, conflicts_with = "yes")]
  pub check: bool,

  /// Answer yes to the fix prompt
  #[arg(long, short = 'y')]
  pub yes: bool,

  /// Compute fixes without writing files
  #[arg(long)]
  pub dry_run: bool,

  /// Show diff of every fix on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append the diff of every fix to a file
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of all findings to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Print every file as it is checked (same as "printChecking" in the config)
  #[arg(long)]
  pub print_checking: bool,

  /// Print every finding (same as "printReports" in the config)
  #[arg(long)]
  pub print_reports: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the check command with the given arguments
pub fn run_check(args: CheckArgs) -> Result<ExitCode> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let mut config = match load_config(args.config.as_deref()) {
    Ok(config) => config,
    Err(e) => {
      print_error(&e);
      return Ok(ExitCode::from(EXIT_CONFIG_ERROR));
    }
  };
  config.print_checking |= args.print_checking;
  config.print_reports |= args.print_reports;
  debug!("Base path: {}", config.base_path.display());

  let mut templates = match TemplateManager::load_template(&config.license_path) {
    Ok(templates) => templates,
    Err(e) => {
      print_error(&anyhow::Error::new(e));
      return Ok(ExitCode::from(EXIT_CONFIG_ERROR));
    }
  };

  let processor = Processor::new(&config, &mut templates)
    .with_diff_manager(DiffManager::new(args.show_diff, args.save_diff.clone()))
    .with_dry_run(args.dry_run);

  let start_time = Instant::now();
  print_start_message();
  let outcome = processor.check();

  let mut summary = ProcessingSummary::from_findings(outcome.files_checked, &outcome.findings, start_time.elapsed());
  summary.files_failed = outcome.files_failed;

  let exit_code = if outcome.findings.is_empty() {
    if outcome.files_failed == 0 {
      print_all_ok();
    }
    ExitCode::SUCCESS
  } else {
    report_findings(&config, &processor, &outcome.findings)?;

    if args.check {
      print_hint("Run without --check to fix the headers.");
      ExitCode::from(EXIT_FINDINGS)
    } else {
      let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AssumeYes)
      } else {
        Box::new(TerminalConfirm)
      };
      let selection = select_fixes(&config.auto_fix, confirm.as_mut())?;
      let to_fix = selection.select(&outcome.findings);

      match &selection {
        FixSelection::Nothing => debug!("Fixing declined"),
        FixSelection::All => print_fixing_all(to_fix.len()),
        FixSelection::Only(categories) => print_fixing_selected(&categories.iter().copied().collect::<Vec<_>>()),
      }

      // The diff file only starts over when something is about to be fixed
      if !to_fix.is_empty() {
        processor.diff_manager().reset()?;
      }
      let fixed = processor.fix(to_fix);
      summary.files_fixed = fixed.fixed;
      summary.files_failed += fixed.failed;
      print_fixed(fixed.fixed, args.dry_run);
      print_failures(fixed.failed, "fixed");

      ExitCode::SUCCESS
    }
  };

  print_failures(outcome.files_failed, "read");
  summary.processing_time = start_time.elapsed();

  if let Some(ref report_path) = args.report_json {
    write_json_report(report_path, &outcome.findings, &summary)?;
    debug!("JSON report written to {}", report_path.display());
  }

  if is_verbose() {
    print_blank_line();
    print_summary(&summary);
  }

  if summary.files_failed > 0 {
    return Ok(ExitCode::from(EXIT_FINDINGS));
  }
  Ok(exit_code)
}

/// Prints the findings and writes the category reports.
fn report_findings(config: &Config, processor: &Processor, findings: &[Finding]) -> Result<()> {
  if config.print_reports {
    print_findings(findings, processor.base_path());
  }

  print_finding_count(findings.len());
  print_report_folder(&config.report_folder);

  let written = ReportWriter::new(&config.report_folder, processor.base_path()).write(findings)?;
  debug!("Wrote {} report files", written.len());
  Ok(())
}
