//! # Price Facet
//!
//! State model for a continuous range facet (a "min price" slider) on a
//! faceted search page.
//!
//! ## Modules
//!
//! - [`shared`]: Query-string codec and the `Domain`/`Bounds` types
//! - [`facet`]: Range expression codec (`[100 TO *]` and friends)
//! - [`selection`]: Selection state, labels, navigation URLs, count ordering
//! - [`config`]: Page configuration
//! - [`api`]: Count refresh HTTP client
//! - [`widget`]: Async facade tying selection state to the count client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use price_facet::prelude::*;
//!
//! let domain = Domain::new(0, 500)?;
//! let mut state = RangeSelectionState::initialize(
//!     None,
//!     "/search/",
//!     "/search/?sort=relevance&min_price=%5B100+TO+300%5D",
//!     domain,
//!     "min_price",
//! );
//! assert_eq!(state.label(), "$100 to 300");
//!
//! // Drag ticks only touch the label
//! assert_eq!(state.slide(200, 500), "$200 to 500+");
//!
//! // Release builds the link and a ticket for the count request
//! let commit = state.commit(200, 500)?;
//! assert_eq!(commit.navigation_url, "/search/?sort=relevance&min_price=%5B200+TO+*%5D");
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Shared utilities and types.
/// Query-string codec plus the numeric range types.
pub mod shared;

/// Range expression codec and facet errors.
pub mod facet;

/// Selection state and count ordering.
pub mod selection;

/// Page configuration.
pub mod config;

/// Count refresh client.
#[cfg(feature = "http")]
pub mod api;

/// Async facade over selection state and count client.
#[cfg(feature = "http")]
pub mod widget;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use price_facet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::shared::{
        parse_params, parse_params_or, serialize_params, Bounds, Domain, ParamMap,
    };

    pub use crate::facet::{
        decode, decode_or_full, encode, humanize, sort_key, Endpoint, FacetError, FacetResult,
    };

    pub use crate::selection::{
        label, navigation_url, Commit, CountTicket, CountUpdate, RangeSelectionState,
    };

    pub use crate::config::{price_field_name, PageConfig};

    #[cfg(feature = "http")]
    pub use crate::api::{ApiError, ApiResult, CountClient, CountClientBuilder, RetryConfig};

    #[cfg(feature = "http")]
    pub use crate::widget::{CommitOutcome, PriceFacet};
}
