//! Core data model: queries, entity links, per-query results and the batch report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diagnostic attached to `unknown` results.
pub const UNPARSEABLE_PAGE_NOTE: &str = "Search page returned without parseable entity links.";

/// Normalization key used for query identity: trimmed and case-folded.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single name submitted for search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// First-seen original string, used for display and the outgoing request.
    pub name: String,
    /// Trimmed, case-folded identity.
    pub key: String,
}

impl Query {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = normalize_key(&name);
        Self { name, key }
    }
}

/// A matched entity: display title plus absolute detail-page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLink {
    pub title: String,
    pub url: String,
}

impl EntityLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Identity used when collapsing duplicate anchors: (URL, case-folded title).
    pub fn dedup_key(&self) -> (String, String) {
        (self.url.clone(), self.title.to_lowercase())
    }
}

impl fmt::Display for EntityLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.url)
        } else {
            write!(f, "{} ({})", self.title, self.url)
        }
    }
}

/// Four-way outcome of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Match,
    NoMatch,
    Unknown,
    Error,
}

impl SearchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Match => "match",
            SearchStatus::NoMatch => "no_match",
            SearchStatus::Unknown => "unknown",
            SearchStatus::Error => "error",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "match" => Ok(SearchStatus::Match),
            "no_match" => Ok(SearchStatus::NoMatch),
            "unknown" => Ok(SearchStatus::Unknown),
            "error" => Ok(SearchStatus::Error),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// Terminal state reached by the classifier for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The page carried the "no matching entities" marker.
    NoMatch,
    /// One or more entity links were extracted.
    Match(Vec<EntityLink>),
    /// Marker absent and nothing extractable.
    Unknown,
    /// The fetch itself failed; carries the failure text.
    Error(String),
}

impl Classification {
    pub fn status(&self) -> SearchStatus {
        match self {
            Classification::NoMatch => SearchStatus::NoMatch,
            Classification::Match(_) => SearchStatus::Match,
            Classification::Unknown => SearchStatus::Unknown,
            Classification::Error(_) => SearchStatus::Error,
        }
    }
}

/// The outcome for one query, as it appears in the batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query_name: String,
    pub status: SearchStatus,
    pub match_count: usize,
    pub search_url: String,
    pub entities: Vec<EntityLink>,
    /// Present iff `status` is `error`.
    pub error: Option<String>,
    /// Informational diagnostic, set for `unknown` results.
    pub note: Option<String>,
}

impl SearchResult {
    pub fn new(query_name: &str, search_url: &str, classification: Classification) -> Self {
        let status = classification.status();
        let (entities, error, note) = match classification {
            Classification::Match(entities) => (entities, None, None),
            Classification::NoMatch => (Vec::new(), None, None),
            Classification::Unknown => (Vec::new(), None, Some(UNPARSEABLE_PAGE_NOTE.to_string())),
            Classification::Error(message) => {
                let message = if message.trim().is_empty() {
                    "request failed".to_string()
                } else {
                    message
                };
                (Vec::new(), Some(message), None)
            }
        };

        Self {
            query_name: query_name.to_string(),
            status,
            match_count: entities.len(),
            search_url: search_url.to_string(),
            entities,
            error,
            note,
        }
    }
}

/// Per-status counts over a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub matched: usize,
    pub no_match: usize,
    pub unknown: usize,
    pub error: usize,
}

/// Ordered results, one per processed query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<SearchResult>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.results.len(),
            ..Summary::default()
        };
        for result in &self.results {
            match result.status {
                SearchStatus::Match => summary.matched += 1,
                SearchStatus::NoMatch => summary.no_match += 1,
                SearchStatus::Unknown => summary.unknown += 1,
                SearchStatus::Error => summary.error += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_is_trimmed_and_folded() {
        let q = Query::new("  Jane DOE ");
        assert_eq!(q.name, "  Jane DOE ");
        assert_eq!(q.key, "jane doe");
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            SearchStatus::Match,
            SearchStatus::NoMatch,
            SearchStatus::Unknown,
            SearchStatus::Error,
        ] {
            assert_eq!(status.as_str().parse::<SearchStatus>(), Ok(status));
        }
        assert!("maybe".parse::<SearchStatus>().is_err());
    }

    #[test]
    fn test_error_present_only_for_error_status() {
        let url = "https://www.opensanctions.org/search/?q=x";
        let matched = SearchResult::new(
            "x",
            url,
            Classification::Match(vec![EntityLink::new("X", "https://e/1")]),
        );
        assert_eq!(matched.match_count, 1);
        assert!(matched.error.is_none());

        let unknown = SearchResult::new("x", url, Classification::Unknown);
        assert_eq!(unknown.status, SearchStatus::Unknown);
        assert!(unknown.error.is_none());
        assert_eq!(unknown.note.as_deref(), Some(UNPARSEABLE_PAGE_NOTE));

        let failed = SearchResult::new("x", url, Classification::Error(String::new()));
        assert_eq!(failed.match_count, 0);
        assert!(failed.error.as_deref().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(
            EntityLink::new("Acme", "https://e/1").to_string(),
            "Acme (https://e/1)"
        );
        assert_eq!(EntityLink::new("", "https://e/1").to_string(), "https://e/1");
    }

    #[test]
    fn test_summary_counts() {
        let mut report = BatchReport::new();
        report.push(SearchResult::new("a", "u", Classification::NoMatch));
        report.push(SearchResult::new("b", "u", Classification::Unknown));
        report.push(SearchResult::new("c", "u", Classification::Error("boom".into())));
        report.push(SearchResult::new(
            "d",
            "u",
            Classification::Match(vec![EntityLink::new("D", "https://e/d")]),
        ));

        let summary = report.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.no_match, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.error, 1);
    }
}
