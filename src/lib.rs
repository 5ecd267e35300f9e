//! # license-checker
//!
//! A tool that checks that source files start with the expected license header.
//!
//! Every configured directory tree has its own comment syntax. The license
//! template is wrapped in that syntax, compared line for line with the
//! leading comment block of each file, and every mismatch is classified:
//!
//! * `NO_LICENSE` - the file does not start with a comment block
//! * `LEN_MISMATCH` - the block has a different number of lines
//! * `OUTDATED` - the only difference is an older copyright year range
//! * `INVALID_LICENSE` - any other difference
//!
//! Findings are written to one report file per category and can be fixed in
//! place, either for configured categories or after confirmation.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use license_checker::config::Config;
//! use license_checker::processor::{FixSelection, Processor};
//! use license_checker::templates::TemplateManager;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Path::new("license-checker.json"))?;
//!     let mut templates = TemplateManager::load_template(&config.license_path)?;
//!
//!     let processor = Processor::new(&config, &mut templates);
//!     let outcome = processor.check();
//!
//!     for finding in &outcome.findings {
//!         println!("{}", finding.report_line(processor.base_path()));
//!     }
//!
//!     let fixed = processor.fix(FixSelection::All.select(&outcome.findings));
//!     println!("Fixed {} files.", fixed.fixed);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`config`] - Configuration loading and validation
//! * [`templates`] - License template loading and header formatting
//! * [`license_detection`] - Header extraction and validation
//! * [`processor`] - Directory traversal, checking and fixing
//! * [`report`] - Finding categories and report files
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod config;
pub mod diff;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod prompt;
pub mod report;
pub mod templates;
