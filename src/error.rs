//! Error types for the scrape pipeline
//!
//! Only transport and configuration problems are errors. An empty result
//! set is a valid outcome, and a card missing a field degrades to that
//! field's default instead of failing the record.

use thiserror::Error;

/// The page could not be fetched.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("failed to read response body: {0}")]
    BodyRead(#[from] std::io::Error),
    #[error("response too large: {0} bytes")]
    TooLarge(u64),
    #[error("fetch disallowed by robots.txt: {0}")]
    RobotsDisallowed(String),
}

/// Top-level pipeline failure.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("marker does not form a valid selector: {0}")]
    Selector(String),
}
