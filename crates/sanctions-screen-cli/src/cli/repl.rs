//! Interactive lookup prompt.
//!
//! Reads one name per line and searches it immediately. Input is only
//! checked for end-of-file or Ctrl+C while waiting for the next line.

use crate::cli::output::{OutputMode, Styled};
use crate::cli::search_cmd::print_result;
use anyhow::Result;
use chrono::Local;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use sanctions_screen::Screener;

/// Inputs that leave the prompt.
const QUIT_COMMANDS: &[&str] = &[":quit", ":q", "quit", "exit"];

/// What to do with one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum LineAction<'a> {
    Skip,
    Quit,
    Search(&'a str),
}

pub fn parse_line(line: &str) -> LineAction<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineAction::Skip;
    }
    let lowered = line.to_lowercase();
    if QUIT_COMMANDS.contains(&lowered.as_str()) {
        return LineAction::Quit;
    }
    LineAction::Search(line)
}

fn print_banner(s: &Styled) {
    eprintln!();
    eprintln!(
        "  {} {}",
        s.bold(&format!("sanctions-screen v{}", env!("CARGO_PKG_VERSION"))),
        s.dim("interactive search")
    );
    eprintln!("    Type a name and press Enter.");
    eprintln!("    {} or {} to quit.", s.cyan(":quit"), s.cyan(":q"));
    eprintln!();
}

/// Run the prompt until the user quits or input ends.
pub async fn run(screener: &Screener, mode: OutputMode) -> Result<()> {
    let s = Styled::new(mode);
    if !mode.quiet {
        print_banner(&s);
    }

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl = DefaultEditor::with_config(config)?;
    let prompt = if mode.color { "\x1b[36mName>\x1b[0m " } else { "Name> " };

    loop {
        match rl.readline(prompt) {
            Ok(line) => match parse_line(&line) {
                LineAction::Skip => continue,
                LineAction::Quit => break,
                LineAction::Search(name) => {
                    let result = screener.search_one(name).await;
                    print_result(&result, screener.max_links(), mode);
                    if !mode.json {
                        println!(
                            "{}",
                            s.dim(&format!("Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S")))
                        );
                    }
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if !mode.quiet {
        eprintln!("  {} Bye.", s.dim("\u{2728}"));
    }
    Ok(())
}
