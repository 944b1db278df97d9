//! Batch screening of names against the OpenSanctions public search.
//!
//! Names are loaded from explicit values, line files and CSV files,
//! deduplicated, searched one at a time with a fixed pause between requests,
//! and classified as `match`, `no_match`, `unknown` or `error`. The results
//! are written to a CSV report in a single pass at the end.
//!
//! # Modules
//!
//! - [`names`] - Name sources and CSV column mapping
//! - [`dedupe`] - Order-preserving deduplication
//! - [`client`] - Search page retrieval
//! - [`pacing`] - Inter-request delay
//! - [`extractor`] - Entity link extraction (pattern and DOM based)
//! - [`classifier`] - Four-way result classification
//! - [`report`] - CSV report writer/reader
//! - [`pipeline`] - The sequential batch pipeline
//! - [`events`] - Progress events and their JSONL log

pub mod classifier;
pub mod client;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod events;
pub mod extractor;
pub mod names;
pub mod pacing;
pub mod pipeline;
pub mod report;
pub mod types;

pub use classifier::{classify, NO_MATCH_MARKER};
pub use client::{build_search_url, FetchedPage, PageFetcher, SearchClient};
pub use config::{ExtractorKind, ScreenConfig};
pub use dedupe::dedupe;
pub use error::{FetchError, LoadError, ReportError, ScreenError};
pub use events::{EventLog, EventSink, ScreenEvent};
pub use extractor::{DomLinkExtractor, EntityLinkExtractor, RegexLinkExtractor};
pub use names::{ColumnMapping, LoadedNames, NameSources};
pub use pacing::Pacer;
pub use pipeline::{prepare_queries, screen, ScreenOutcome, Screener};
pub use report::{read_report, write_report, ReportRow};
pub use types::{
    BatchReport, Classification, EntityLink, Query, SearchResult, SearchStatus, Summary,
};
