//! Sequential screening pipeline: names → queries → fetch → classify → report.
//!
//! Each query is fully resolved before the next one starts, so the report
//! order is exactly the query order. A failed fetch only affects its own row.

use crate::classifier::classify;
use crate::client::{PageFetcher, SearchClient};
use crate::config::ScreenConfig;
use crate::dedupe::dedupe;
use crate::error::{Result, ScreenError};
use crate::events::{EventSink, ScreenEvent};
use crate::extractor::{self, EntityLinkExtractor};
use crate::names::{LoadedNames, NameSources};
use crate::pacing::Pacer;
use crate::types::{BatchReport, Query, SearchResult, SearchStatus};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a completed batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOutcome {
    pub report: BatchReport,
    /// Non-fatal diagnostics from loading (e.g. skipped CSV rows).
    pub notices: Vec<String>,
}

/// Apply dedupe and the query limit to loaded names.
pub fn prepare_queries(names: &[String], config: &ScreenConfig) -> Vec<Query> {
    let mut queries = dedupe(names, config.dedupe);
    if config.limit > 0 {
        queries.truncate(config.limit);
    }
    queries
}

/// Searches names one at a time against a page fetcher.
pub struct Screener {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Box<dyn EntityLinkExtractor>,
    pacer: Pacer,
    max_links: usize,
}

impl Screener {
    /// Screener backed by the real HTTP client.
    pub fn new(config: &ScreenConfig) -> Result<Self> {
        config.validate()?;
        let client = SearchClient::new(config)?;
        Ok(Self::with_fetcher(Arc::new(client), config))
    }

    /// Screener using a caller-provided fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: &ScreenConfig) -> Self {
        Self {
            fetcher,
            extractor: extractor::from_config(config),
            pacer: Pacer::new(config.delay),
            max_links: config.max_links,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn EntityLinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn max_links(&self) -> usize {
        self.max_links
    }

    /// Fetch and classify a single name. Never fails: fetch errors become an `error` result.
    pub async fn search_one(&self, name: &str) -> SearchResult {
        let outcome = self.fetcher.fetch(name).await;
        let search_url = match &outcome {
            Ok(page) => page.requested_url.clone(),
            Err(_) => self
                .fetcher
                .search_url(name)
                .map(|u| u.to_string())
                .unwrap_or_default(),
        };

        let classification = classify(&outcome, self.extractor.as_ref(), self.max_links);
        let result = SearchResult::new(name, &search_url, classification);

        match result.status {
            SearchStatus::Error => warn!(
                name,
                error = result.error.as_deref().unwrap_or(""),
                "search failed"
            ),
            status => info!(name, %status, match_count = result.match_count, "search finished"),
        }

        result
    }

    /// Screen every query in order, pausing between requests.
    pub async fn run_batch(&self, queries: &[Query], events: &EventSink) -> BatchReport {
        let total = queries.len();
        let mut report = BatchReport::new();
        events.emit(ScreenEvent::Started { total });

        for (index, query) in queries.iter().enumerate() {
            events.emit(ScreenEvent::QueryStarted {
                index,
                name: query.name.clone(),
            });

            let result = self.search_one(&query.name).await;
            events.emit(ScreenEvent::QueryFinished {
                index,
                total,
                name: query.name.clone(),
                status: result.status,
                match_count: result.match_count,
            });
            report.push(result);

            self.pacer.pause_after(index, total).await;
        }

        events.emit(ScreenEvent::Finished {
            summary: report.summary(),
        });
        report
    }
}

/// Load names, build queries and run the batch.
///
/// Fails before any request is made if an input file is unreadable or no
/// name could be resolved.
pub async fn screen(
    sources: &NameSources,
    screener: &Screener,
    config: &ScreenConfig,
    events: &EventSink,
) -> Result<ScreenOutcome> {
    let LoadedNames { names, notices, .. } = sources.load()?;
    if names.is_empty() {
        return Err(ScreenError::NoNames);
    }

    let queries = prepare_queries(&names, config);
    info!(
        loaded = names.len(),
        queries = queries.len(),
        "screening names"
    );
    for notice in &notices {
        events.emit(ScreenEvent::Notice {
            message: notice.clone(),
        });
    }

    let report = screener.run_batch(&queries, events).await;
    Ok(ScreenOutcome { report, notices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{build_search_url, FetchedPage};
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use url::Url;

    /// Serves canned bodies by name and records the request order.
    struct CannedFetcher {
        pages: HashMap<String, std::result::Result<String, ()>>,
        calls: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        fn new(pages: &[(&str, std::result::Result<&str, ()>)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.map(String::from)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for CannedFetcher {
        fn search_url(&self, name: &str) -> std::result::Result<Url, FetchError> {
            Ok(build_search_url("https://www.opensanctions.org", name)?)
        }

        async fn fetch(&self, name: &str) -> std::result::Result<FetchedPage, FetchError> {
            self.calls.lock().unwrap().push(name.to_string());
            let url = self.search_url(name)?.to_string();
            match self.pages.get(name) {
                Some(Ok(body)) => Ok(FetchedPage {
                    requested_url: url.clone(),
                    final_url: url,
                    body: body.clone(),
                }),
                _ => Err(FetchError::Timeout { timeout_secs: 0.1 }),
            }
        }
    }

    fn config() -> ScreenConfig {
        ScreenConfig {
            delay: Duration::ZERO,
            ..ScreenConfig::default()
        }
    }

    const NO_MATCH: &str = "<p>No matching entities were found.</p>";
    const TWO_LINKS: &str = r#"<a href="/entities/A/">A</a><a href="/entities/B/">B</a>"#;

    #[test]
    fn test_prepare_queries_dedupes_then_limits() {
        let names: Vec<String> = ["a", "A", "b", "c"].iter().map(|s| s.to_string()).collect();
        let config = ScreenConfig {
            limit: 2,
            ..ScreenConfig::default()
        };
        let queries = prepare_queries(&names, &config);
        assert_eq!(queries.iter().map(|q| q.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);

        let config = ScreenConfig {
            dedupe: false,
            ..ScreenConfig::default()
        };
        assert_eq!(prepare_queries(&names, &config).len(), 4);
    }

    #[tokio::test]
    async fn test_run_batch_one_result_per_query_in_order() {
        let fetcher = Arc::new(CannedFetcher::new(&[
            ("alpha", Ok(TWO_LINKS)),
            ("beta", Err(())),
            ("gamma", Ok(NO_MATCH)),
            ("delta", Ok("<html></html>")),
        ]));
        let screener = Screener::with_fetcher(fetcher.clone(), &config());
        let queries: Vec<Query> = ["alpha", "beta", "gamma", "delta"]
            .into_iter()
            .map(Query::new)
            .collect();

        let report = screener.run_batch(&queries, &EventSink::none()).await;
        let statuses: Vec<SearchStatus> = report.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                SearchStatus::Match,
                SearchStatus::Error,
                SearchStatus::NoMatch,
                SearchStatus::Unknown
            ]
        );
        assert_eq!(*fetcher.calls.lock().unwrap(), vec!["alpha", "beta", "gamma", "delta"]);
        assert_eq!(
            report.results[1].search_url,
            "https://www.opensanctions.org/search/?q=beta"
        );
        assert_eq!(report.results[1].match_count, 0);
    }

    #[tokio::test]
    async fn test_run_batch_streams_events() {
        let fetcher = Arc::new(CannedFetcher::new(&[("a", Ok(NO_MATCH)), ("b", Ok(TWO_LINKS))]));
        let screener = Screener::with_fetcher(fetcher, &config());
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let queries = vec![Query::new("a"), Query::new("b")];

        screener.run_batch(&queries, &EventSink::new(tx)).await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.first(), Some(&ScreenEvent::Started { total: 2 }));
        assert!(matches!(events.last(), Some(ScreenEvent::Finished { summary }) if summary.matched == 1));
        let finished = events
            .iter()
            .filter(|e| matches!(e, ScreenEvent::QueryFinished { .. }))
            .count();
        assert_eq!(finished, 2);
    }

    #[tokio::test]
    async fn test_screen_without_names_is_fatal() {
        let fetcher = Arc::new(CannedFetcher::new(&[]));
        let screener = Screener::with_fetcher(fetcher.clone(), &config());
        let sources = NameSources {
            explicit: vec!["  ".into()],
            ..NameSources::default()
        };

        let err = screen(&sources, &screener, &config(), &EventSink::none())
            .await
            .unwrap_err();
        assert!(matches!(err, ScreenError::NoNames));
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_one_caps_links() {
        let fetcher = Arc::new(CannedFetcher::new(&[("x", Ok(TWO_LINKS))]));
        let config = ScreenConfig {
            max_links: 1,
            ..config()
        };
        let result = Screener::with_fetcher(fetcher, &config).search_one("x").await;
        assert_eq!(result.status, SearchStatus::Match);
        assert_eq!(result.match_count, 1);
        assert_eq!(result.entities[0].url, "https://www.opensanctions.org/entities/A/");
    }
}
