//! HTTP client wrapper for the portal.
//!
//! The parsing core never touches the network; this collaborator owns
//! timeouts, the inter-request delay floor, and bounded retries, and
//! hands the core a complete `(status, body)` pair.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use crate::config::{HTTP_TIMEOUT_SECS, MIN_REQUEST_DELAY_MS};
use crate::error::{HarvestError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("rada-harvester/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Portal HTTP client with rate limiting and retry behavior.
pub struct PortalClient {
    client: Client,
    last_request: Mutex<Option<Instant>>,
}

impl PortalClient {
    /// Create a configured client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            last_request: Mutex::new(None),
        })
    }

    /// Sleep until at least [`MIN_REQUEST_DELAY_MS`] has passed since
    /// the previous request.
    fn honor_delay(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(at) = *last {
            let floor = Duration::from_millis(MIN_REQUEST_DELAY_MS);
            let elapsed = at.elapsed();
            if elapsed < floor {
                thread::sleep(floor - elapsed);
            }
        }
        *last = Some(Instant::now());
    }

    /// Fetch a page, returning `(status_code, body_text)`.
    ///
    /// Retries with exponential backoff on connection/timeout errors,
    /// 429, and 5xx responses. Any other response — success or client
    /// error — is returned as-is for the caller to interpret.
    pub fn fetch_page(&self, url: &str) -> Result<(u16, String)> {
        let mut last_error: Option<String> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1000ms
                let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
                tracing::debug!(attempt, delay_ms = delay, "retrying after delay");
                thread::sleep(Duration::from_millis(delay));
            }
            self.honor_delay();

            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();

                    if status.is_server_error() || status.as_u16() == 429 {
                        tracing::warn!(
                            status = %status,
                            attempt = attempt + 1,
                            max_retries = MAX_RETRIES,
                            "transient portal error, will retry"
                        );
                        last_error = Some(format!("portal returned {status}"));
                        continue;
                    }

                    let code = status.as_u16();
                    let body = response.text()?;
                    return Ok((code, body));
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        tracing::warn!(
                            error = %e,
                            attempt = attempt + 1,
                            max_retries = MAX_RETRIES,
                            "connection error, will retry"
                        );
                        last_error = Some(e.to_string());
                        continue;
                    }
                    return Err(HarvestError::Http(e));
                }
            }
        }

        Err(HarvestError::RetriesExhausted {
            attempts: MAX_RETRIES,
            message: last_error.unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(PortalClient::new().is_ok());
    }

    #[test]
    fn test_honor_delay_enforces_floor() {
        let client = PortalClient::new().unwrap();
        client.honor_delay();
        let start = Instant::now();
        client.honor_delay();
        assert!(start.elapsed() >= Duration::from_millis(MIN_REQUEST_DELAY_MS));
    }
}
