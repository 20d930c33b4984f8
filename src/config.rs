//! Pipeline configuration
//!
//! Defaults carry the constants observed on the live marketplace. The
//! markers are loose structural hooks into one specific frontend's
//! generated markup, so every one of them is overridable; a markup change
//! should cost a config edit, not a code change.

use serde::{Deserialize, Serialize};

/// HTTP fetch behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Browser-like identity sent as the User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether to follow redirects at all
    #[serde(default = "default_true")]
    pub follow_redirects: bool,
    /// Redirect bound when following is enabled
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Consult robots.txt before fetching (adds one extra request per run)
    #[serde(default)]
    pub respect_robots: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            follow_redirects: true,
            max_redirects: default_max_redirects(),
            respect_robots: false,
        }
    }
}

/// Markers for locating item cards and their fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Fixed site origin prefixed to scraped relative links
    pub origin: String,
    /// Class-attribute substring marking the card grid container
    pub grid_marker: String,
    /// Class-attribute substring marking the item name element
    pub name_marker: String,
    /// Text substring identifying the price element within a card
    pub currency_marker: String,
    /// src-attribute substring identifying the item preview image
    pub image_marker: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            origin: "https://kubeo.net".to_string(),
            grid_marker: "grid".to_string(),
            name_marker: "truncate".to_string(),
            currency_marker: "ph-currency-circle-dollar".to_string(),
            image_marker: "items".to_string(),
        }
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// The marketplace listing page to scrape
    #[serde(default = "default_page_url")]
    pub page_url: String,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            fetch: FetchConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

fn default_page_url() -> String {
    "https://kubeo.net/#/marketplace".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> u32 {
    10
}

fn default_true() -> bool {
    true
}
