//! robots.txt courtesy check
//!
//! Off by default so a pipeline run stays at exactly one external request.
//! When enabled, the check fetches the target host's robots.txt once and
//! asks it about the listing page; an unreachable or unparsable file
//! allows the fetch.

use texting_robots::Robot;
use tracing::debug;
use url::Url;

use crate::error::TransportError;

/// Check whether `page_url` may be fetched under the host's robots.txt.
pub fn check(
    agent: &ureq::Agent,
    page_url: &str,
    user_agent: &str,
) -> Result<(), TransportError> {
    let Ok(parsed) = Url::parse(page_url) else {
        // An unusable URL fails in the fetcher with a real transport error
        return Ok(());
    };
    let Some(host) = parsed.host_str() else {
        return Ok(());
    };

    let robots_url = format!("{}://{}/robots.txt", parsed.scheme(), host);
    let robots_txt = match agent.get(&robots_url).call() {
        Ok(resp) if resp.status().is_success() => {
            resp.into_body().read_to_string().unwrap_or_default()
        }
        _ => return Ok(()), // no robots.txt = allow all
    };

    let allowed = Robot::new(user_agent, robots_txt.as_bytes())
        .map(|r| r.allowed(page_url))
        .unwrap_or(true);
    debug!(%robots_url, allowed, "robots.txt consulted");

    if allowed {
        Ok(())
    } else {
        Err(TransportError::RobotsDisallowed(page_url.to_string()))
    }
}
