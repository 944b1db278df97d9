//! Progress display and event logging for batch runs.
//!
//! The batch pipeline streams [`ScreenEvent`]s over a channel; this module
//! drains it on a separate task to drive an `indicatif` bar and, optionally,
//! a JSONL event log.

use indicatif::{ProgressBar, ProgressStyle};
use sanctions_screen::{EventLog, ScreenEvent, SearchStatus};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::warn;

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("\u{2588}\u{2589}\u{2591}")
}

/// Tallies shown in the bar message while the batch runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    matched: usize,
    errors: usize,
}

impl Tally {
    fn record(&mut self, status: SearchStatus) {
        match status {
            SearchStatus::Match => self.matched += 1,
            SearchStatus::Error => self.errors += 1,
            _ => {}
        }
    }

    fn message(&self) -> String {
        format!("match={} error={}", self.matched, self.errors)
    }
}

/// Spawn the consumer. It finishes once every sender has been dropped.
pub fn spawn_consumer(
    mut rx: UnboundedReceiver<ScreenEvent>,
    show_bar: bool,
    mut log: Option<EventLog>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let bar = if show_bar {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(bar_style());
        let mut tally = Tally::default();

        while let Some(event) = rx.recv().await {
            if let Some(log) = log.as_mut() {
                if let Err(e) = log.log(&event) {
                    warn!("failed to write event log: {e}");
                }
            }

            match &event {
                ScreenEvent::Started { total } => bar.set_length(*total as u64),
                ScreenEvent::QueryStarted { name, .. } => {
                    bar.set_message(format!("{} {name}", tally.message()));
                }
                ScreenEvent::QueryFinished { status, .. } => {
                    tally.record(*status);
                    bar.set_message(tally.message());
                    bar.inc(1);
                }
                ScreenEvent::Notice { .. } => {}
                ScreenEvent::Finished { .. } => bar.finish_and_clear(),
            }
        }

        if !bar.is_finished() {
            bar.finish_and_clear();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanctions_screen::Summary;

    #[test]
    fn test_tally_message() {
        let mut tally = Tally::default();
        tally.record(SearchStatus::Match);
        tally.record(SearchStatus::NoMatch);
        tally.record(SearchStatus::Error);
        assert_eq!(tally.message(), "match=1 error=1");
    }

    #[tokio::test]
    async fn test_consumer_writes_event_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let log = EventLog::open(&path).unwrap();

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = spawn_consumer(rx, false, Some(log));
        tx.send(ScreenEvent::Started { total: 1 }).unwrap();
        tx.send(ScreenEvent::Finished {
            summary: Summary::default(),
        })
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
