//! `sanctions-screen search` — one-shot lookup, or the interactive prompt.

use crate::cli::output::{self, OutputMode, Styled};
use crate::cli::repl;
use crate::cli::SearchArgs;
use anyhow::Result;
use sanctions_screen::{Screener, SearchResult, SearchStatus};

/// Run the search command. Returns `false` when a one-shot lookup failed.
pub async fn run(args: &SearchArgs, mode: OutputMode) -> Result<bool> {
    let config = args.config()?;
    let screener = Screener::new(&config)?;

    match args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let result = screener.search_one(name).await;
            print_result(&result, screener.max_links(), mode);
            Ok(result.status != SearchStatus::Error)
        }
        None => {
            repl::run(&screener, mode).await?;
            Ok(true)
        }
    }
}

/// Print a lookup result as a text block or JSON object.
pub fn print_result(result: &SearchResult, max_links: usize, mode: OutputMode) {
    if mode.json {
        match serde_json::to_value(result) {
            Ok(value) => output::print_json(&value),
            Err(e) => eprintln!("failed to serialize result: {e}"),
        }
        return;
    }

    let s = Styled::new(mode);
    println!();
    println!("{}", output::format_result(&s, result, max_links));
}
