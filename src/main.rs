//! Demo runner: scrape the marketplace once and print the records as JSON.
//!
//! A transport failure exits nonzero with the error chain instead of
//! rendering an empty grid; an empty extraction gets its own distinct
//! notice so breakage is not mistaken for an empty marketplace.

use market_scraper::{scrape_page, ScrapeConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = ScrapeConfig::default();
    if let Some(url) = std::env::args().nth(1) {
        config.page_url = url;
    }

    match scrape_page(&config) {
        Ok(records) if records.is_empty() => {
            eprintln!(
                "no items extracted from {}; the page is client-rendered or its markup changed",
                config.page_url
            );
        }
        Ok(records) => match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize records: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("scrape failed: {err}");
            std::process::exit(1);
        }
    }
}
