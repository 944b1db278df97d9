//! Entity link extraction from search result markup.
//!
//! The classifier only depends on [`EntityLinkExtractor`]; the pattern-based
//! scanner is the default and the DOM-based one can be swapped in without
//! touching classification.

pub mod dom;
pub mod pattern;

use crate::config::{ExtractorKind, ScreenConfig};
use crate::types::EntityLink;
use std::collections::HashSet;

pub use dom::DomLinkExtractor;
pub use pattern::RegexLinkExtractor;

/// Path prefix of entity detail pages on the search site.
pub const ENTITY_PATH_PREFIX: &str = "/entities/";

/// Capability to pull entity links out of a result page.
///
/// Implementations must be tolerant (malformed markup yields fewer links,
/// never an error) and deterministic for a given input and cap.
pub trait EntityLinkExtractor: Send + Sync {
    /// Ordered, deduplicated links in document order, at most `max` of them.
    fn extract(&self, markup: &str, max: usize) -> Vec<EntityLink>;
}

/// Build the extractor selected by the configuration.
pub fn from_config(config: &ScreenConfig) -> Box<dyn EntityLinkExtractor> {
    match config.extractor {
        ExtractorKind::Regex => Box::new(RegexLinkExtractor::new(config.site_root())),
        ExtractorKind::Dom => Box::new(DomLinkExtractor::new(config.site_root())),
    }
}

/// Accumulates links in encounter order, dropping repeats and stopping at the cap.
pub(crate) struct LinkCollector<'a> {
    site_root: &'a str,
    max: usize,
    seen: HashSet<(String, String)>,
    links: Vec<EntityLink>,
}

impl<'a> LinkCollector<'a> {
    pub(crate) fn new(site_root: &'a str, max: usize) -> Self {
        Self {
            site_root,
            max,
            seen: HashSet::new(),
            links: Vec::new(),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.links.len() >= self.max
    }

    /// Offer a relative entity path and its cleaned title. Returns `true` once the cap is hit.
    pub(crate) fn offer(&mut self, rel_path: &str, title: String) -> bool {
        if self.is_full() {
            return true;
        }
        let link = EntityLink::new(title, format!("{}{rel_path}", self.site_root));
        if self.seen.insert(link.dedup_key()) {
            self.links.push(link);
        }
        self.is_full()
    }

    pub(crate) fn finish(self) -> Vec<EntityLink> {
        self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <ul>
          <li><a class="entity" href="/entities/Q1/">Vladimir <b>Putin</b></a></li>
          <li><a href="/entities/Q2/" title="x">Putin &amp; Co</a></li>
          <li><a href="/about/">About</a></li>
          <li><a href="/entities/Q1/">VLADIMIR PUTIN</a></li>
          <li><a href="/entities/Q3/">Vladimir Vladimirovich Putin</a></li>
          <li><a href="/entities/Q4/">  Putin Foundation </a></li>
        </ul>
    "#;

    fn extractors() -> Vec<Box<dyn EntityLinkExtractor>> {
        vec![
            Box::new(RegexLinkExtractor::new("https://www.opensanctions.org")),
            Box::new(DomLinkExtractor::new("https://www.opensanctions.org")),
        ]
    }

    #[test]
    fn test_both_extractors_agree_on_well_formed_markup() {
        let all = extractors();
        assert_eq!(all[0].extract(PAGE, 10), all[1].extract(PAGE, 10));
    }

    #[test]
    fn test_extract_dedupes_and_keeps_order() {
        for extractor in extractors() {
            let links = extractor.extract(PAGE, 10);
            let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
            assert_eq!(
                titles,
                vec![
                    "Vladimir Putin",
                    "Putin & Co",
                    "Vladimir Vladimirovich Putin",
                    "Putin Foundation"
                ]
            );
            assert_eq!(links[0].url, "https://www.opensanctions.org/entities/Q1/");
        }
    }

    #[test]
    fn test_extract_respects_cap() {
        for extractor in extractors() {
            let links = extractor.extract(PAGE, 3);
            assert_eq!(links.len(), 3);
            assert_eq!(links[2].url, "https://www.opensanctions.org/entities/Q3/");
            assert!(extractor.extract(PAGE, 0).is_empty());
        }
    }

    #[test]
    fn test_extract_is_deterministic() {
        for extractor in extractors() {
            assert_eq!(extractor.extract(PAGE, 4), extractor.extract(PAGE, 4));
        }
    }

    #[test]
    fn test_distinct_titles_same_url_are_kept() {
        let page = r#"<a href="/entities/A/">Alpha</a><a href="/entities/A/">Alpha Corp</a>"#;
        for extractor in extractors() {
            assert_eq!(extractor.extract(page, 5).len(), 2);
        }
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = ScreenConfig {
            base_url: "http://localhost:9000/".into(),
            ..ScreenConfig::default()
        };
        let links = from_config(&config).extract(r#"<a href="/entities/Z/">Z</a>"#, 1);
        assert_eq!(links[0].url, "http://localhost:9000/entities/Z/");
    }
}
