//! Facet-specific error types.

use thiserror::Error;

/// Errors raised while decoding facet queries or building facet state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacetError {
    /// A side of a range expression is neither `*` nor an integer
    #[error("Invalid range bound '{token}' in facet query '{query}'")]
    InvalidBound { query: String, token: String },

    /// Lower bound greater than upper bound
    #[error("Inverted range: start {start} is greater than end {end}")]
    InvertedRange { start: i64, end: i64 },

    /// Bounds outside the facet domain
    #[error("Range {start}..{end} lies outside domain {min}..{max}")]
    OutOfDomain { start: i64, end: i64, min: i64, max: i64 },

    /// Domain minimum greater than maximum
    #[error("Invalid domain: min {min} is greater than max {max}")]
    InvalidDomain { min: i64, max: i64 },

    /// Query-string serialization failure
    #[error("Query string error: {0}")]
    QueryString(String),

    /// Page configuration could not be read
    #[error("Invalid page configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for facet operations.
pub type FacetResult<T> = Result<T, FacetError>;
