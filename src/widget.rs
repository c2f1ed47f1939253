//! Async facade binding a [`RangeSelectionState`] to a [`CountClient`].
//!
//! Event callbacks from the page call [`PriceFacet::slide`] on every drag
//! tick and [`PriceFacet::commit`] on release. Commits may overlap; a
//! count response is only shown if no newer commit happened meanwhile.
//!
//! # Example
//!
//! ```rust,ignore
//! use price_facet::api::CountClient;
//! use price_facet::config::PageConfig;
//! use price_facet::widget::PriceFacet;
//!
//! let config = PageConfig::from_json(page_json)?;
//! let client = CountClient::new("http://localhost:8000/trips/search/")?;
//! let facet = PriceFacet::from_config(config, client)?;
//!
//! let label = facet.slide(100, 300).await;
//! let outcome = facet.commit(100, 300).await?;
//! println!("{} {:?} -> {}", label, outcome.count_text, outcome.navigation_url);
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::CountClient;
use crate::config::PageConfig;
use crate::facet::error::FacetResult;
use crate::selection::{CountUpdate, RangeSelectionState};

/// Result of a committed selection once its count request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub label: String,
    pub navigation_url: String,
    /// What happened to this commit's count response
    pub count: CountUpdate,
    /// Count suffix to display now, e.g. `"(42)"`
    pub count_text: Option<String>,
}

/// A price facet control with its count refresh wiring.
#[derive(Debug, Clone)]
pub struct PriceFacet {
    state: Arc<RwLock<RangeSelectionState>>,
    client: CountClient,
}

impl PriceFacet {
    pub fn new(state: RangeSelectionState, client: CountClient) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            client,
        }
    }

    /// Build from page configuration.
    pub fn from_config(config: PageConfig, client: CountClient) -> FacetResult<Self> {
        Ok(Self::new(config.into_state()?, client))
    }

    /// Drag tick: update bounds and return the label. No network traffic.
    pub async fn slide(&self, start: i64, end: i64) -> String {
        self.state.write().await.slide(start, end)
    }

    /// Release: rebuild the navigation URL and refresh the count.
    ///
    /// The state lock is not held while the count request is in flight.
    pub async fn commit(&self, start: i64, end: i64) -> FacetResult<CommitOutcome> {
        let commit = self.state.write().await.commit(start, end)?;

        let result = self.client.fetch_count(&commit.count_query).await;

        let mut state = self.state.write().await;
        let count = state.apply_count(&commit.ticket, result);

        Ok(CommitOutcome {
            label: commit.label,
            navigation_url: commit.navigation_url,
            count,
            count_text: state.count_text(),
        })
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> RangeSelectionState {
        self.state.read().await.clone()
    }

    /// Last good result count.
    pub async fn displayed_count(&self) -> Option<u64> {
        self.state.read().await.displayed_count()
    }

    /// Current label.
    pub async fn label(&self) -> String {
        self.state.read().await.label()
    }

    /// Current link target.
    pub async fn href(&self) -> String {
        self.state.read().await.href().to_string()
    }
}
