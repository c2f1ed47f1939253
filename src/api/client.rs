//! Count refresh client implementation.
//!
//! The [`CountClient`] asks the search page for the number of results a
//! candidate facet query would produce. The endpoint answers a request
//! carrying the encoded query plus a count flag with a plain integer body.
//!
//! # Example
//!
//! ```rust,ignore
//! use price_facet::api::CountClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CountClient::new("http://localhost:8000/trips/search/")?;
//!
//!     let count = client.fetch_count("sort=priority&min_price_GBP=%5B500+TO+*%5D").await?;
//!     println!("{} matching trips", count);
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, StatusCode};

use crate::api::error::{ApiError, ApiResult};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Query parameter that switches the search page into count-only mode.
pub const DEFAULT_COUNT_PARAM: &str = "count";

/// Longest response snippet kept in error messages.
const MAX_ERROR_BODY_LEN: usize = 200;

/// How the count client retries transient failures.
///
/// Only connection failures, timeouts, `429` and `5xx` responses are
/// retried. A count that arrives late is discarded by the selection state
/// anyway, so retries stay off unless enabled.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Extra attempts after the first request; 0 disables retrying
    pub max_retries: u32,
    /// Wait before the first retry, doubled for each later one (ms)
    pub base_delay_ms: u64,
    /// Upper limit for a single wait (ms)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 100,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig {
    /// Retry a failed count request up to `max_retries` times.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn with_base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    pub fn with_max_delay_ms(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    /// Wait before retry number `attempt + 1`.
    ///
    /// The doubled delay is capped at `max_delay_ms`, then randomly shortened
    /// by up to a quarter so concurrent pages do not retry in lockstep.
    fn backoff(&self, attempt: u32) -> Duration {
        let ceiling = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10))
            .min(self.max_delay_ms);
        let floor = ceiling - ceiling / 4;
        Duration::from_millis(rand::thread_rng().gen_range(floor..=ceiling))
    }
}

/// Builder for configuring [`CountClient`].
#[derive(Debug, Clone)]
pub struct CountClientBuilder {
    endpoint: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
    retry_config: RetryConfig,
    count_param: String,
}

impl CountClientBuilder {
    /// Create a new builder for the given endpoint (usually the search page URL).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
            retry_config: RetryConfig::default(),
            count_param: DEFAULT_COUNT_PARAM.to_string(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Retry transient count failures with jittered exponential backoff.
    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Name of the count-only flag parameter (default `count`).
    pub fn count_param(mut self, name: impl Into<String>) -> Self {
        self.count_param = name.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<CountClient> {
        if self.endpoint.is_empty() {
            return Err(ApiError::InvalidParameter("endpoint cannot be empty".to_string()));
        }
        if self.count_param.is_empty() {
            return Err(ApiError::InvalidParameter("count_param cannot be empty".to_string()));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("text/plain, text/html"),
        );

        for (name, value) in self.default_headers {
            let header_name = reqwest::header::HeaderName::try_from(name.as_str())
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = reqwest::header::HeaderValue::from_str(&value)
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .default_headers(headers)
            .build()?;

        Ok(CountClient {
            http_client,
            endpoint: self.endpoint,
            retry_config: self.retry_config,
            count_param: self.count_param,
        })
    }
}

/// Client for the result-count endpoint.
#[derive(Debug, Clone)]
pub struct CountClient {
    http_client: Client,
    endpoint: String,
    retry_config: RetryConfig,
    count_param: String,
}

impl CountClient {
    /// Create a new client with default settings (30s timeout, no retries).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoint: impl Into<String>) -> ApiResult<Self> {
        CountClientBuilder::new(endpoint).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(endpoint: impl Into<String>) -> CountClientBuilder {
        CountClientBuilder::new(endpoint)
    }

    /// Get the endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for an encoded facet query.
    pub fn count_url(&self, encoded_query: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        if encoded_query.is_empty() {
            format!("{}{}{}=true", self.endpoint, separator, self.count_param)
        } else {
            format!(
                "{}{}{}&{}=true",
                self.endpoint, separator, encoded_query, self.count_param
            )
        }
    }

    /// Fetch the result count for an encoded facet query.
    ///
    /// # Errors
    ///
    /// Network failures, non-success statuses and non-numeric bodies are
    /// returned as errors; callers keep their previous count.
    pub async fn fetch_count(&self, encoded_query: &str) -> ApiResult<u64> {
        let url = self.count_url(encoded_query);
        let body = self.get_text(&url).await?;
        parse_count(&body)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// GET `url` and return the body text.
    ///
    /// Transient failures are retried according to the [`RetryConfig`];
    /// any other failure is returned at once.
    async fn get_text(&self, url: &str) -> ApiResult<String> {
        let retry = &self.retry_config;
        let mut attempt = 0;

        loop {
            let error = match self.http_client.get(url).send().await {
                Ok(response) if response.status().is_success() => return Ok(response.text().await?),
                Ok(response) => {
                    let status = response.status();
                    let error = Self::parse_error_response(response).await;
                    if !Self::is_retryable_status(status) {
                        return Err(error);
                    }
                    error
                }
                Err(e) if e.is_connect() || e.is_timeout() || e.is_request() => ApiError::Http(e),
                Err(e) => return Err(ApiError::Http(e)),
            };

            if attempt >= retry.max_retries {
                return Err(error);
            }

            let delay = retry.backoff(attempt);
            tracing::debug!(
                attempt = attempt + 1,
                max_retries = retry.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Count request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Turn a non-success response into an ApiError.
    async fn parse_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = match response.text().await {
            Ok(text) => truncate(text.trim()),
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                format!("HTTP {} (body unreadable: {})", status, e)
            }
        };
        Self::map_status_error(status, body)
    }

    /// Map HTTP status code to ApiError.
    fn map_status_error(status: StatusCode, body: String) -> ApiError {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(body),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(body),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(body),
            _ if status.is_server_error() => ApiError::ServerError(body),
            _ => ApiError::UnexpectedStatus(status.as_u16(), body),
        }
    }

    /// Check if a status code is retryable.
    fn is_retryable_status(status: StatusCode) -> bool {
        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY_LEN).collect()
}

/// Parse a count response body as a base-10 integer.
pub fn parse_count(body: &str) -> ApiResult<u64> {
    let trimmed = body.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| ApiError::InvalidCount(truncate(trimmed)))
}
