//! HTTP client for the public events feed

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

/// Default base URL for the GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Events per page; the feed caps this at 100
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from a single page request
///
/// None of these escape the fetch stage; they decide whether the fetch
/// degrades to an empty or a partial result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connect failure, timeout)
    #[error("request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The response body was not a JSON array of event records
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// True when the request itself failed, as opposed to its body
    pub fn is_request_failure(&self) -> bool {
        matches!(self, FetchError::Http(_) | FetchError::Status(_))
    }
}

/// Client for the public events endpoint
///
/// Unauthenticated requests work; a token raises the rate limit but does
/// not change the response shape.
pub struct GithubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    page_size: u32,
}

impl GithubClient {
    /// Creates a client against the given base URL
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("recap-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Returns the base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of the user's public events feed
    ///
    /// Records come back as raw JSON values so a single malformed record
    /// can be skipped without losing the rest of the page.
    pub fn events_page(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Vec<serde_json::Value>, FetchError> {
        let url = format!("{}/users/{}/events/public", self.base_url, username);

        let mut request = self.http.get(&url).query(&[
            ("page", page.to_string()),
            ("per_page", self.page_size.to_string()),
        ]);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request
            .send()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json().map_err(|e| FetchError::Decode(e.to_string()))
    }
}
