//! # license-checker
//!
//! A tool that checks source files start with the expected license header
//! and fixes the ones that do not.

use std::process::ExitCode;

use license_checker::cli::{Cli, run_check};
use license_checker::output::print_error;

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run_check(cli.get_check_args()) {
    Ok(code) => code,
    Err(e) => {
      print_error(&e);
      ExitCode::FAILURE
    }
  }
}
