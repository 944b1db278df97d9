//! `sanctions-screen batch` — screen a list of names and write a CSV report.

use crate::cli::output::{self, OutputMode, Styled};
use crate::cli::progress;
use crate::cli::BatchArgs;
use anyhow::{Context, Result};
use sanctions_screen::{screen, write_report, EventLog, EventSink, ScreenOutcome, Screener, Summary};
use std::path::Path;
use tracing::info;

/// Run the batch command. The report is only written after every query was processed.
pub async fn run(args: &BatchArgs, mode: OutputMode) -> Result<()> {
    let sources = args.sources();
    let config = args.config()?;
    let screener = Screener::new(&config)?;

    let log = match &args.events_log {
        Some(path) => Some(
            EventLog::open(path)
                .with_context(|| format!("failed to open events log: {}", path.display()))?,
        ),
        None => None,
    };

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let consumer = progress::spawn_consumer(rx, mode.show_progress(), log);
    let events = EventSink::new(tx);

    let result = screen(&sources, &screener, &config, &events).await;
    drop(events);
    consumer.await.ok();

    let ScreenOutcome { report, notices } = result?;

    write_report(&args.output, &report)?;
    info!(path = %args.output.display(), rows = report.len(), "report written");

    let s = Styled::new(mode);
    for notice in &notices {
        eprintln!("{} Notice: {notice}", s.warn_sym());
    }

    print_summary(&s, mode, &args.output, &report.summary());
    Ok(())
}

fn print_summary(s: &Styled, mode: OutputMode, output: &Path, summary: &Summary) {
    if mode.json {
        output::print_json(&serde_json::json!({
            "output": output.display().to_string(),
            "total": summary.total,
            "match": summary.matched,
            "no_match": summary.no_match,
            "unknown": summary.unknown,
            "error": summary.error,
        }));
        return;
    }

    println!("{}", summary_line(s, output, summary));
}

/// `Done. Output: <path> | total=.., match=.., ...`
pub fn summary_line(s: &Styled, output: &Path, summary: &Summary) -> String {
    format!(
        "{} Done. Output: {} | total={}, match={}, no_match={}, unknown={}, error={}",
        s.ok_sym(),
        output.display(),
        summary.total,
        summary.matched,
        summary.no_match,
        summary.unknown,
        summary.error
    )
}
