//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for catalog pages
//! - Error classification into [`FetchFailure`]
//!
//! There is no retry. A failed page is reported once and left behind.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchFailure;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use book_scout::config::{CrawlerConfig, UserAgentConfig};
/// use book_scout::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body as text
///
/// # Failure Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | Non-2xx status | `FetchFailure::Status` |
/// | Timeout | `FetchFailure::Timeout` |
/// | Connection refused / DNS / TLS | `FetchFailure::Connect` |
/// | Anything else, including body read errors | `FetchFailure::Transport` |
///
/// The body is decoded as UTF-8; invalid sequences are replaced rather than
/// rejected.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, FetchFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetches a URL and parses it into an HTML document
///
/// Failures are logged here and returned; they never propagate as panics.
pub async fn fetch_document(client: &Client, url: &str) -> Result<Html, FetchFailure> {
    match fetch_text(client, url).await {
        Ok(body) => {
            tracing::trace!("Fetched {} ({} bytes)", url, body.len());
            Ok(Html::parse_document(&body))
        }
        Err(failure) => {
            tracing::debug!("Error fetching URL {}: {:?}", url, failure);
            Err(failure)
        }
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchFailure {
    let url = url.to_string();
    if error.is_timeout() {
        FetchFailure::Timeout {
            url,
            message: error.to_string(),
        }
    } else if error.is_connect() {
        FetchFailure::Connect {
            url,
            message: error.to_string(),
        }
    } else {
        FetchFailure::Transport {
            url,
            message: error.to_string(),
        }
    }
}
