//! Tolerant HTML parsing
//!
//! Malformed markup is repaired, not rejected: the tree builder closes
//! unclosed tags, recovers from invalid nesting, and keeps text nodes.
//! Bytes that are not valid UTF-8 are replaced rather than raised.

use scraper::Html;
use tracing::debug;

/// Build a DOM tree from raw page bytes.
///
/// Never fails; the worst input produces a near-empty tree. Parse
/// diagnostics are counted for observability and then discarded, since
/// partial structure is an expected state for scraped pages.
pub fn parse(bytes: &[u8]) -> Html {
    let text = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&text);
    if !document.errors.is_empty() {
        debug!(count = document.errors.len(), "suppressed parse diagnostics");
    }
    document
}
