//! Count refresh client module.
//!
//! The search page doubles as the count endpoint: the same query string
//! plus `count=true` returns the number of matching results as a plain
//! integer body.
//!
//! # Client Configuration
//!
//! ```rust,ignore
//! use price_facet::api::{CountClient, RetryConfig};
//! use std::time::Duration;
//!
//! let client = CountClient::builder("http://localhost:8000/trips/search/")
//!     .timeout(Duration::from_secs(5))
//!     .header("X-Requested-With", "XMLHttpRequest")
//!     .with_retry(RetryConfig::new(2))
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! ```rust,ignore
//! match client.fetch_count(&commit.count_query).await {
//!     Ok(count) => println!("({})", count),
//!     Err(ApiError::InvalidCount(body)) => println!("Unexpected body: {}", body),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{parse_count, CountClient, CountClientBuilder, RetryConfig, DEFAULT_COUNT_PARAM};
pub use error::{ApiError, ApiResult};
