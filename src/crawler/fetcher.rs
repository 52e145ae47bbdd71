//! HTTP prober and page fetcher
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Probing links and classifying the response
//! - Manual redirect handling so the redirect history can be inspected
//! - Fetching page bodies with bounded retry

use crate::config::Config;
use crate::SweepError;
use reqwest::{header::LOCATION, redirect::Policy, Client, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Reason recorded for links whose request failed at the transport level
pub const NO_RESPONSE: &str = "No Response";

/// Result of probing a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The link resolves
    Ok,
    /// The link redirects or ends in a non-success status
    Broken(String),
    /// No response could be obtained (DNS, connect, timeout, TLS)
    Unreachable,
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The reason reported for a failed link, or `None` for `Ok`
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Broken(reason) => Some(reason),
            Self::Unreachable => Some(NO_RESPONSE),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => f.write_str(reason),
            None => f.write_str("OK"),
        }
    }
}

/// Status history of a probe
///
/// `history` holds every 3xx response seen before `status`, in order. A 304
/// response is recorded as a hop and ends the chain, so it is also `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub history: Vec<StatusCode>,
    pub status: StatusCode,
}

/// Formats a status as `"<code> <reason phrase>"`, e.g. `"404 Not Found"`
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Classifies a probe response
///
/// # Rules
///
/// | History | Result |
/// |---------|--------|
/// | first hop is 304 | Ok (conditional-GET artifact, not a redirect) |
/// | first hop is any other 3xx | Broken, reason = first hop |
/// | empty, 2xx status | Ok |
/// | empty, other status | Broken, reason = status |
///
/// Only the first hop is inspected; later hops never change the result.
pub fn classify_response(response: &ProbeResponse) -> ProbeOutcome {
    if let Some(first) = response.history.first() {
        if *first == StatusCode::NOT_MODIFIED {
            return ProbeOutcome::Ok;
        }
        return ProbeOutcome::Broken(status_line(*first));
    }

    if response.status.is_success() {
        ProbeOutcome::Ok
    } else {
        ProbeOutcome::Broken(status_line(response.status))
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are never followed by the client; [`Prober`] follows them
/// itself so the first hop can be inspected.
///
/// # Example
///
/// ```no_run
/// use site_sweep::config::Config;
/// use site_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues probes and page fetches against the site
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    max_redirects: u32,
}

impl Prober {
    /// Creates a prober from the crawler configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.crawler.max_redirects,
        ))
    }

    /// Creates a prober around an existing client
    ///
    /// The client should be built with `redirect::Policy::none()`.
    pub fn with_client(client: Client, max_redirects: u32) -> Self {
        Self {
            client,
            max_redirects,
        }
    }

    /// Probes a URL and classifies the outcome
    ///
    /// Transport failures are not errors here: they classify as
    /// [`ProbeOutcome::Unreachable`].
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.follow(url).await {
            Ok(response) => {
                let outcome = classify_response(&response);
                if !response.history.is_empty() {
                    tracing::debug!(
                        "{} redirected {} time(s), final status {}: {}",
                        url,
                        response.history.len(),
                        status_line(response.status),
                        outcome
                    );
                }
                outcome
            }
            Err(e) => {
                tracing::debug!("No response from {}: {}", url, e);
                ProbeOutcome::Unreachable
            }
        }
    }

    /// Sends GET requests, following redirects manually up to the hop limit
    pub async fn follow(&self, url: &str) -> Result<ProbeResponse, reqwest::Error> {
        let mut history = Vec::new();
        let mut current = url.to_string();

        loop {
            let response = self.client.get(&current).send().await?;
            let status = response.status();

            if !status.is_redirection() {
                return Ok(ProbeResponse { history, status });
            }

            history.push(status);

            if status == StatusCode::NOT_MODIFIED
                || history.len() > self.max_redirects as usize
            {
                return Ok(ProbeResponse { history, status });
            }

            let next = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|location| Url::parse(&current).ok()?.join(location).ok());

            match next {
                Some(next) => current = next.to_string(),
                None => return Ok(ProbeResponse { history, status }),
            }
        }
    }

    /// Fetches the body of a page
    ///
    /// Any non-success status is a failure; redirects are not followed because
    /// pages are only queued after probing `Ok`.
    pub async fn fetch_page(&self, url: &str) -> Result<String, SweepError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SweepError::PageFetch {
                url: url.to_string(),
                reason: status_line(status),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches a page, retrying failures with exponential backoff
    ///
    /// # Arguments
    ///
    /// * `url` - The page to fetch
    /// * `retries` - Extra attempts after the first failure
    /// * `backoff` - Delay before the first retry, doubled for each further one
    pub async fn fetch_page_with_retry(
        &self,
        url: &str,
        retries: u32,
        backoff: Duration,
    ) -> Result<String, SweepError> {
        let mut delay = backoff;
        let mut attempt = 0;

        loop {
            match self.fetch_page(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < retries => {
                    attempt += 1;
                    tracing::debug!(
                        "Fetch of {} failed ({}), retry {}/{} in {:?}",
                        url,
                        e,
                        attempt,
                        retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
