//! Line-based prompts on stdin.
//!
//! Prompt text goes to stderr so stdout stays clean for `--json` output.
//! Ctrl-C while waiting for input fails the prompt with [`Interrupted`].

use std::fmt;
use std::io::Write as _;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use siteaudit_core::model::BusinessType;

use crate::render::{BOLD, CYAN, DIM, RESET};

/// The user pressed Ctrl-C at a prompt.
#[derive(Debug)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("interrupted")
    }
}

impl std::error::Error for Interrupted {}

pub struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn next_line(&mut self) -> Result<Option<String>> {
        tokio::select! {
            line = self.lines.next_line() => line.context("failed to read from stdin"),
            Ok(()) = tokio::signal::ctrl_c() => Err(Interrupted.into()),
        }
    }

    /// Ask for one line. Fails if stdin closes first.
    pub async fn ask(&mut self, label: &str) -> Result<String> {
        eprint!("  {BOLD}{CYAN}?{RESET} {label}: ");
        let _ = std::io::stderr().flush();
        match self.next_line().await? {
            Some(line) => Ok(line),
            None => bail!("input closed before {} was entered", label.to_lowercase()),
        }
    }

    /// Ask for a business type by number or by value.
    pub async fn ask_business_type(&mut self) -> Result<String> {
        for (i, bt) in BusinessType::ALL.iter().enumerate() {
            eprintln!("    {DIM}{}){RESET} {} {DIM}({}){RESET}", i + 1, bt.label(), bt.value());
        }
        let answer = self.ask("Business type").await?;
        Ok(business_type_from_answer(&answer))
    }

    /// Yes/no question. A closed stdin counts as "no".
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        eprint!("  {BOLD}{CYAN}?{RESET} {question} {DIM}[y/N]{RESET} ");
        let _ = std::io::stderr().flush();
        let line = self.next_line().await?;
        Ok(line.is_some_and(|l| matches!(l.trim().to_lowercase().as_str(), "y" | "yes")))
    }
}

/// Map a menu number to its form value; anything else passes through.
fn business_type_from_answer(answer: &str) -> String {
    let trimmed = answer.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| BusinessType::ALL.get(i))
        .map_or_else(|| trimmed.to_owned(), |bt| bt.value().to_owned())
}
