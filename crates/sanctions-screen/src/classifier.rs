//! Four-way classification of a fetched search page.

use crate::client::FetchedPage;
use crate::error::FetchError;
use crate::extractor::EntityLinkExtractor;
use crate::types::Classification;

/// Literal text the search site renders when a query has no results.
pub const NO_MATCH_MARKER: &str = "No matching entities were found.";

/// Resolve one fetch outcome into exactly one terminal state.
///
/// A failed fetch is `Error` without inspecting any markup. Otherwise the
/// no-results marker takes precedence over any anchors on the page, then
/// extracted links mean `Match`, and a page with neither is `Unknown`.
pub fn classify(
    outcome: &Result<FetchedPage, FetchError>,
    extractor: &dyn EntityLinkExtractor,
    max_links: usize,
) -> Classification {
    match outcome {
        Err(err) => Classification::Error(err.to_string()),
        Ok(page) => classify_page(&page.body, extractor, max_links),
    }
}

/// Classify page markup that was retrieved successfully.
pub fn classify_page(
    body: &str,
    extractor: &dyn EntityLinkExtractor,
    max_links: usize,
) -> Classification {
    if body.contains(NO_MATCH_MARKER) {
        return Classification::NoMatch;
    }

    let links = extractor.extract(body, max_links);
    if links.is_empty() {
        Classification::Unknown
    } else {
        Classification::Match(links)
    }
}
