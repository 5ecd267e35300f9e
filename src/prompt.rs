//! # Prompt Module
//!
//! The yes/no confirmation asked before fixing headers when no categories are
//! configured for automatic fixing.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result};

/// The question asked before fixing every finding.
pub const FIX_PROMPT: &str = "Fix it automatically?";

/// Source of yes/no answers.
pub trait Confirm {
  fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Accepts `y` or `yes` in any letter case, ignoring surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
  let answer = answer.trim();
  answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Asks on the terminal, or reads one line from stdin when not interactive.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
  fn confirm(&mut self, question: &str) -> Result<bool> {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
      return dialoguer::Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .with_context(|| "Failed to read confirmation");
    }

    print!("{} [Y/N] ", question);
    std::io::stdout().flush().with_context(|| "Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
      .lock()
      .read_line(&mut input)
      .with_context(|| "Failed to read confirmation")?;
    println!();

    Ok(is_affirmative(&input))
  }
}

/// Answers every question with yes, for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
  fn confirm(&mut self, question: &str) -> Result<bool> {
    tracing::debug!("Answering yes to: {}", question);
    Ok(true)
  }
}
