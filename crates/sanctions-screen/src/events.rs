//! Progress events streamed out of a batch run, plus a JSONL sink for them.

use crate::types::{SearchStatus, Summary};
use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;

/// One step of a screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScreenEvent {
    Started {
        total: usize,
    },
    QueryStarted {
        index: usize,
        name: String,
    },
    QueryFinished {
        index: usize,
        total: usize,
        name: String,
        status: SearchStatus,
        match_count: usize,
    },
    Notice {
        message: String,
    },
    Finished {
        summary: Summary,
    },
}

/// Optional event channel; sending never fails the run.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<ScreenEvent>>,
}

impl EventSink {
    pub fn new(tx: UnboundedSender<ScreenEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn none() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: ScreenEvent) {
        if let Some(tx) = &self.tx {
            // Receiver may already be gone; progress is best-effort.
            let _ = tx.send(event);
        }
    }
}

impl From<Option<UnboundedSender<ScreenEvent>>> for EventSink {
    fn from(tx: Option<UnboundedSender<ScreenEvent>>) -> Self {
        Self { tx }
    }
}

#[derive(Serialize)]
struct EventLine<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a ScreenEvent,
}

/// Append-only JSONL log of screening events.
pub struct EventLog {
    file: File,
}

impl EventLog {
    /// Open or create the log file, creating parent directories.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Append one event as a JSON line.
    pub fn log(&mut self, event: &ScreenEvent) -> std::io::Result<()> {
        let line = EventLine {
            timestamp: Utc::now().to_rfc3339(),
            event,
        };
        let json = serde_json::to_string(&line)?;
        writeln!(self.file, "{json}")
    }
}
