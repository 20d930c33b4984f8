//! The scrape pipeline: fetch, then parse, then extract
//!
//! Stages run strictly in sequence and a transport failure short-circuits
//! the run, so empty or garbage payloads never reach the extractor and
//! masquerade as "no items for sale".

use tracing::warn;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extractors::{CardExtractor, ItemRecord};
use crate::fetcher::Fetcher;
use crate::parser;

/// Run the pipeline once against the configured page.
///
/// `Ok(vec![])` is a valid outcome distinct from a fetch failure: it
/// usually means the marketplace markup changed, or that the page is
/// client-rendered and the server delivered no grid at all.
pub fn scrape_page(config: &ScrapeConfig) -> Result<Vec<ItemRecord>, ScrapeError> {
    // Markers compile before any request goes out; a bad config fails here
    let extractor = CardExtractor::new(&config.extractor)?;
    let fetcher = Fetcher::new(&config.fetch);

    let bytes = fetcher.fetch(&config.page_url)?;
    let document = parser::parse(&bytes);
    let records = extractor.extract(&document);

    if records.is_empty() {
        warn!(url = %config.page_url, "no item cards matched; markers may be stale");
    }

    Ok(records)
}
