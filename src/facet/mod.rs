//! Range facet codec.
//!
//! Facet values travel through URLs as range expressions understood by the
//! search backend:
//!
//! ```text
//! [100 TO 300]   100 up to 300
//! [200 TO *]     200 or more
//! [* TO 500]     up to 500
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use price_facet::facet::{decode, encode};
//! use price_facet::shared::{Bounds, Domain};
//!
//! let domain = Domain::new(0, 500)?;
//! let bounds = decode(Some("[200 TO *]"), &domain)?;
//! assert_eq!(bounds, Bounds::new(200, 500, &domain)?);
//! assert_eq!(encode(&bounds, &domain), "[200 TO *]");
//! ```

pub mod error;
pub mod range;

pub use error::{FacetError, FacetResult};
pub use range::{decode, decode_or_full, encode, humanize, parse_raw, sort_key, Endpoint, WILDCARD};
