//! Blocking page fetch with browser emulation
//!
//! One GET per run. The agent carries a browser-like User-Agent so the
//! marketplace does not reject the client outright, follows redirects up
//! to a configured bound, and surfaces every transport problem as a typed
//! error instead of handing garbage to the parser.

use std::io::Read;
use std::time::Duration;

use tracing::debug;

use crate::config::FetchConfig;
use crate::error::TransportError;
use crate::robots;

/// Responses past this size are rejected rather than buffered.
const MAX_RESPONSE_BYTES: u64 = 10 * 1024 * 1024;

pub struct Fetcher {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let max_redirects = if config.follow_redirects {
            config.max_redirects
        } else {
            0
        };
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .user_agent(config.user_agent.as_str())
                .max_redirects(max_redirects)
                .http_status_as_error(false)
                .build(),
        );
        Self {
            agent,
            config: config.clone(),
        }
    }

    /// Fetch the raw page bytes.
    ///
    /// Network failures, timeouts and non-success statuses are all
    /// transport errors; the caller decides whether they are fatal. No
    /// retries: one failed GET means the site is unreachable right now.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        if self.config.respect_robots {
            robots::check(&self.agent, url, &self.config.user_agent)?;
        }

        let mut response = self.agent.get(url).call()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        if let Some(length) = declared_length(&response) {
            if length > MAX_RESPONSE_BYTES {
                return Err(TransportError::TooLarge(length));
            }
        }

        let mut body = Vec::new();
        response
            .body_mut()
            .as_reader()
            .take(MAX_RESPONSE_BYTES + 1)
            .read_to_end(&mut body)?;
        if body.len() as u64 > MAX_RESPONSE_BYTES {
            return Err(TransportError::TooLarge(body.len() as u64));
        }

        debug!(url, status = status.as_u16(), bytes = body.len(), "page fetched");
        Ok(body)
    }
}

fn declared_length(response: &ureq::http::Response<ureq::Body>) -> Option<u64> {
    response
        .headers()
        .get("content-length")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
