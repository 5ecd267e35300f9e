//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing and supports subcommands for
//! extensibility.

mod check;

use std::sync::LazyLock;

pub use check::{CheckArgs, EXIT_CONFIG_ERROR, EXIT_FINDINGS, run_check};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Version string with the commit the binary was built from, when known.
static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
  let version = env!("CARGO_PKG_VERSION");
  match (option_env!("GIT_HASH"), option_env!("GIT_DATE")) {
    (Some(hash), Some(date)) if !hash.is_empty() => format!("{} ({} {})", version, hash, date),
    (Some(hash), _) if !hash.is_empty() => format!("{} ({})", version, hash),
    _ => version.to_string(),
  }
});

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION.as_str(),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check headers using license-checker.json from the current directory
  license-checker

  # Fail in CI when any header is wrong, without prompting or fixing
  license-checker --check --config ci/license-checker.toml

  # Fix everything without asking
  license-checker --yes

  # Preview fixes without writing files
  license-checker --yes --dry-run --show-diff

  # Write a machine-readable report
  license-checker --check --report-json license-report.json
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub check_args: CheckArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Check license headers and optionally fix them (default)
  Check(CheckArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Get the effective check arguments, whether from a subcommand or top-level
  pub fn get_check_args(self) -> CheckArgs {
    match self.command {
      Some(Command::Check(args)) => args,
      None => self.check_args,
    }
  }
}
