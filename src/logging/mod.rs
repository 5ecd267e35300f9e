//! # Logging Module
//!
//! This module provides logging utilities for the license checker, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - The tracing subscriber used for diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the console
//! messages can be piped while diagnostics stay on the terminal.
//!
//! ## Example
//!
//! ```rust
//! use license_checker::logging::{ColorMode, set_verbose};
//! use license_checker::{info_log, verbose_log};
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Checking root: {}", "src");
//!
//! // Log an info message (goes to stdout)
//! info_log!("Checking {}...", "src/main.rs");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// It uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            println!($($arg)*);
        }
    };
}
