//! Typed errors for the screening library.
//!
//! Load and report errors are fatal for a run. Fetch errors are routine and
//! never leave the pipeline: they are folded into an `error` result row.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the list of names to screen.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A line-delimited or tabular input file could not be read.
    #[error("failed to read input file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tabular file is not valid comma-delimited text.
    #[error("failed to parse CSV file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Per-query retrieval failures.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request timed out after {timeout_secs:.1}s")]
    Timeout { timeout_secs: f64 },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Transport failure; the message carries the full cause chain.
    #[error("HTTP error: {}", error_chain(.0))]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        FetchError::Http(err)
    }
}

/// Render an error followed by each of its sources, joined with `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Errors raised while writing or reading a report file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to open report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in report {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Top-level failures of a screening run.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// No source produced a usable name.
    #[error("no names provided; use explicit names, a line file or a CSV file")]
    NoNames,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result type alias for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
