//! HTML-parser-backed entity link extractor.

use super::{EntityLinkExtractor, LinkCollector, ENTITY_PATH_PREFIX};
use crate::types::EntityLink;
use scraper::{Html, Selector};

/// Parses the page with `scraper` and selects entity anchors by `href` prefix.
#[derive(Debug, Clone)]
pub struct DomLinkExtractor {
    site_root: String,
}

impl DomLinkExtractor {
    pub fn new(site_root: &str) -> Self {
        Self {
            site_root: site_root.trim_end_matches('/').to_string(),
        }
    }
}

impl EntityLinkExtractor for DomLinkExtractor {
    fn extract(&self, markup: &str, max: usize) -> Vec<EntityLink> {
        let mut collector = LinkCollector::new(&self.site_root, max);
        if collector.is_full() {
            return collector.finish();
        }

        let Ok(selector) = Selector::parse(&format!(r#"a[href^="{ENTITY_PATH_PREFIX}"]"#)) else {
            return collector.finish();
        };
        let document = Html::parse_document(markup);

        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.len() <= ENTITY_PATH_PREFIX.len() {
                continue;
            }
            let title = anchor.text().collect::<String>().trim().to_string();
            if collector.offer(href, title) {
                break;
            }
        }

        collector.finish()
    }
}
