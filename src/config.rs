//! Page configuration.
//!
//! The page template embeds the facet settings as a JSON object, read once
//! at load and never mutated afterwards.
//!
//! ```json
//! {
//!     "slider_min": 0,
//!     "slider_max": 5000,
//!     "item_base_url": "/trips/search/",
//!     "item_url": "/trips/search/?sort=priority&min_price_GBP=%5B500+TO+1000%5D",
//!     "item_count": 42,
//!     "price_field": "min_price_GBP",
//!     "price_query": "[500 TO 1000]",
//!     "currency_symbol": "£"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::facet::error::{FacetError, FacetResult};
use crate::selection::{RangeSelectionState, DEFAULT_CURRENCY_SYMBOL};
use crate::shared::Domain;

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

/// Facet settings supplied by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Domain minimum
    #[serde(default)]
    pub slider_min: i64,
    /// Domain maximum
    pub slider_max: i64,
    /// Search page URL without query
    pub item_base_url: String,
    /// Current URL including the existing query
    pub item_url: String,
    /// Result count rendered with the page
    #[serde(default)]
    pub item_count: Option<u64>,
    /// Query parameter key of the facet
    pub price_field: String,
    /// Currently selected range expression, if any
    #[serde(default)]
    pub price_query: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl PageConfig {
    /// Parse the JSON configuration embedded in a page.
    pub fn from_json(json: &str) -> FacetResult<Self> {
        serde_json::from_str(json).map_err(|e| FacetError::InvalidConfig(e.to_string()))
    }

    /// Domain described by the slider settings.
    pub fn domain(&self) -> FacetResult<Domain> {
        Domain::new(self.slider_min, self.slider_max)
    }

    /// Build the selection state for this page.
    pub fn into_state(self) -> FacetResult<RangeSelectionState> {
        let domain = self.domain()?;
        let query = self.price_query.as_deref().filter(|q| !q.is_empty());
        Ok(RangeSelectionState::initialize(
            query,
            self.item_base_url,
            self.item_url,
            domain,
            self.price_field,
        )
        .with_currency_symbol(self.currency_symbol)
        .with_initial_count(self.item_count))
    }
}

/// Facet field name for a per-currency price index, e.g. `min_price_GBP`.
pub fn price_field_name(root: &str, currency_code: &str) -> String {
    format!("{}_{}", root, currency_code.to_ascii_uppercase())
}
