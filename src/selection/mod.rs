//! Range selection state and count ordering.
//!
//! Drag ticks go through [`RangeSelectionState::slide`], which only
//! recomputes the label. A release goes through
//! [`RangeSelectionState::commit`], which rebuilds the navigation URL and
//! issues a [`CountTicket`] for the count request.

pub mod count;
pub mod state;

pub use count::{CountTicket, CountTracker, CountUpdate};
pub use state::{label, merged_params, navigation_url, Commit, RangeSelectionState, DEFAULT_CURRENCY_SYMBOL};
