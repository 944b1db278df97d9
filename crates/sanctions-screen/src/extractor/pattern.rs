//! Pattern-based entity link scanner.
//!
//! Does not require well-formed markup: anything that does not look like an
//! entity anchor is skipped.

use super::{EntityLinkExtractor, LinkCollector};
use crate::types::EntityLink;
use regex::Regex;
use std::sync::LazyLock;

static ENTITY_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]+href="(/entities/[^"]+)"[^>]*>(.*?)</a>"#).unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Strip nested tags, decode character references and trim.
pub fn clean_title(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, "");
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

/// Scans raw markup for `<a href="/entities/...">` anchors.
#[derive(Debug, Clone)]
pub struct RegexLinkExtractor {
    site_root: String,
}

impl RegexLinkExtractor {
    pub fn new(site_root: &str) -> Self {
        Self {
            site_root: site_root.trim_end_matches('/').to_string(),
        }
    }
}

impl EntityLinkExtractor for RegexLinkExtractor {
    fn extract(&self, markup: &str, max: usize) -> Vec<EntityLink> {
        let mut collector = LinkCollector::new(&self.site_root, max);
        if collector.is_full() {
            return collector.finish();
        }

        for caps in ENTITY_ANCHOR_RE.captures_iter(markup) {
            let rel_path = &caps[1];
            let title = clean_title(&caps[2]);
            if collector.offer(rel_path, title) {
                break;
            }
        }

        collector.finish()
    }
}
