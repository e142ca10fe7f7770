//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during a walk:
//! - Building the shared HTTP client with the configured timeout
//! - GET requests with unbounded exponential-backoff retry
//! - Deriving the content type that drives index/leaf dispatch

use crate::crawler::retry::RetryPolicy;
use crate::FatalError;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Content type of gallery index pages
pub const INDEX_CONTENT_TYPE: &str = "text/html";

/// Something that can issue a GET request
///
/// `reqwest::Client` is the production transport; tests substitute their own
/// to simulate connection failures.
pub trait Transport {
    /// Error produced when a request never got a response
    type Error: Display;

    /// Sends a GET request for `url`
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, Self::Error>>;

    /// Returns true if retrying `error` can never succeed
    fn is_permanent(&self, _error: &Self::Error) -> bool {
        false
    }
}

impl Transport for Client {
    type Error = reqwest::Error;

    async fn get(&self, url: &str) -> Result<Response, reqwest::Error> {
        Client::get(self, url).send().await
    }

    fn is_permanent(&self, error: &reqwest::Error) -> bool {
        error.is_builder()
    }
}

/// A fetched gallery node: the open response plus what the walker needs to
/// classify it
#[derive(Debug)]
pub struct Page {
    url: String,
    status: StatusCode,
    content_type: String,
    response: Response,
}

impl Page {
    /// Wraps a response received for `url`
    pub fn new(url: impl Into<String>, response: Response) -> Self {
        Self {
            url: url.into(),
            status: response.status(),
            content_type: content_type_of(response.headers()),
            response,
        }
    }

    /// The URL that was requested
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status of the response
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// MIME type of the response, without parameters
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns true if this page is a gallery listing
    pub fn is_index(&self) -> bool {
        self.content_type == INDEX_CONTENT_TYPE
    }

    /// Reads the whole body as text
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }

    /// Hands over the open response, e.g. to stream the body
    pub fn into_response(self) -> Response {
        self.response
    }
}

/// Extracts the MIME type from a `Content-Type` header
///
/// Parameters after `;` are dropped and the result is lowercased. A missing
/// or non-ASCII header yields an empty string.
pub fn content_type_of(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Builds the HTTP client shared by every request of a walk
///
/// # Arguments
///
/// * `timeout` - Timeout applied to each individual request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests, retrying transport failures with exponential backoff
#[derive(Debug, Clone)]
pub struct Fetcher<T = Client> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T> {
    /// Creates a fetcher over an already configured transport
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetches `url`, logging each retry
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Any HTTP response (including 4xx/5xx) | Returned as a `Page` |
    /// | Connection refused, timeout, DNS failure | Retry after backoff, forever |
    /// | Request cannot be built (bad URL) | `FatalError::Fetch` |
    pub async fn fetch(&self, url: &str) -> Result<Page, FatalError> {
        self.fetch_with_notify(url, |error, wait| {
            tracing::warn!("{} waiting {:?} to retry...", error, wait);
        })
        .await
    }

    /// Fetches `url`, calling `notify` with the error and the upcoming wait
    /// before each retry
    pub async fn fetch_with_notify<F>(&self, url: &str, mut notify: F) -> Result<Page, FatalError>
    where
        F: FnMut(&T::Error, Duration),
    {
        let mut intervals = self.policy.intervals();

        loop {
            match self.transport.get(url).await {
                Ok(response) => return Ok(Page::new(url, response)),
                Err(e) if self.transport.is_permanent(&e) => {
                    return Err(FatalError::Fetch {
                        url: url.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    let wait = intervals.next().unwrap_or(self.policy.max_interval);
                    notify(&e, wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}
