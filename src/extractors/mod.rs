//! Item extraction from the parsed marketplace page
//!
//! Card-scoped structural queries with per-field fallbacks.

mod card_extractor;

pub use card_extractor::CardExtractor;

use serde::{Deserialize, Serialize};

/// Fallback name when a card has no name element.
pub const UNKNOWN_NAME: &str = "Unknown Item";
/// Fallback price when a card has no price element.
pub const FREE_PRICE: &str = "Free";
/// Placeholder href when a card anchor has no usable link.
pub const MISSING_LINK: &str = "#";

/// One marketplace listing, produced from exactly one matched card anchor.
///
/// Fields are best-effort: an absent sub-element degrades to its fallback
/// and never drops the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    /// Free-form price text as scraped, not a parsed amount
    pub price: String,
    /// Preview image reference; empty when the card carries none
    pub image: String,
    /// Absolute item page URL (origin + scraped href)
    pub link: String,
}
