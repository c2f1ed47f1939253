//! Range selection state.
//!
//! Single source of truth for one facet control: its domain, the selected
//! bounds, the non-facet URL parameters, and everything derived from them
//! (label, navigation URL, count request).

use crate::facet::error::FacetResult;
use crate::facet::range::{decode_or_full, encode, Endpoint};
use crate::selection::count::{CountTicket, CountTracker, CountUpdate};
use crate::shared::{parse_params, serialize_params, Bounds, Domain, ParamMap};

/// Default currency symbol used in labels.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Build the display label for a selection.
///
/// `Endpoint::Unbounded` is normalized to `domain.max` first; an end equal
/// to `domain.max` renders as `"<max>+"`.
pub fn label(start: i64, end: Endpoint, domain: &Domain, currency_symbol: &str) -> String {
    let end = end.or(domain.max());
    if end == domain.max() {
        format!("{}{} to {}+", currency_symbol, start, end)
    } else {
        format!("{}{} to {}", currency_symbol, start, end)
    }
}

/// Merge the encoded bounds into a copy of `existing` under `facet_field`.
pub fn merged_params(bounds: &Bounds, domain: &Domain, existing: &ParamMap, facet_field: &str) -> ParamMap {
    let mut params = existing.clone();
    params.insert(facet_field, encode(bounds, domain));
    params
}

/// Build `<base_url>?<params>` with the facet parameter set to `bounds`.
///
/// Every other parameter in `existing` is preserved unchanged.
pub fn navigation_url(
    base_url: &str,
    bounds: &Bounds,
    domain: &Domain,
    existing: &ParamMap,
    facet_field: &str,
) -> FacetResult<String> {
    let params = merged_params(bounds, domain, existing, facet_field);
    Ok(format!("{}?{}", base_url, serialize_params(&params)?))
}

/// Query component of `current_url` relative to `base_url`.
fn relative_query<'a>(base_url: &str, current_url: &'a str) -> &'a str {
    let rest = current_url.strip_prefix(base_url).unwrap_or(current_url);
    let rest = rest.split('#').next().unwrap_or_default();
    rest.split_once('?').map(|(_, query)| query).unwrap_or_default()
}

/// Artifacts produced when the user commits a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub bounds: Bounds,
    pub label: String,
    pub navigation_url: String,
    /// Encoded parameters for the count request, without the count flag
    pub count_query: String,
    pub ticket: CountTicket,
}

/// State of a single range facet control.
#[derive(Debug, Clone)]
pub struct RangeSelectionState {
    domain: Domain,
    bounds: Bounds,
    base_url: String,
    /// Link target shown for the current selection
    href: String,
    params: ParamMap,
    facet_field: String,
    currency_symbol: String,
    counts: CountTracker,
}

impl RangeSelectionState {
    /// Initialize from the page URLs.
    ///
    /// Parameters are read from `current_url` with `base_url` removed. The
    /// initial bounds come from `raw_query` or, when absent, from the facet
    /// parameter in the URL; malformed values fall back to the full domain.
    pub fn initialize(
        raw_query: Option<&str>,
        base_url: impl Into<String>,
        current_url: impl Into<String>,
        domain: Domain,
        facet_field: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let current_url = current_url.into();
        let facet_field = facet_field.into();

        let params = parse_params(relative_query(&base_url, &current_url));
        let query = raw_query.or_else(|| params.get(&facet_field));
        let bounds = decode_or_full(query, &domain);

        tracing::debug!(
            facet_field = %facet_field,
            start = bounds.start(),
            end = bounds.end(),
            "Initialized range selection"
        );

        Self {
            domain,
            bounds,
            base_url,
            href: current_url,
            params,
            facet_field,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            counts: CountTracker::default(),
        }
    }

    /// Set the currency symbol used in labels.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Set the count displayed before any refresh.
    pub fn with_initial_count(mut self, count: Option<u64>) -> Self {
        self.counts = CountTracker::new(count);
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn facet_field(&self) -> &str {
        &self.facet_field
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Non-facet parameters carried into navigation URLs.
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Current link target: the page URL until the first commit.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Set a parameter to preserve in later navigation URLs.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key, value);
    }

    /// Drop a parameter from later navigation URLs.
    pub fn remove_param(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Label for the current bounds.
    pub fn label(&self) -> String {
        label(
            self.bounds.start(),
            Endpoint::Value(self.bounds.end()),
            &self.domain,
            &self.currency_symbol,
        )
    }

    /// Encoded facet value for the current bounds.
    pub fn encoded(&self) -> String {
        encode(&self.bounds, &self.domain)
    }

    /// Navigation URL for the current bounds.
    pub fn navigation_url(&self) -> FacetResult<String> {
        navigation_url(&self.base_url, &self.bounds, &self.domain, &self.params, &self.facet_field)
    }

    /// Interaction tick: update the bounds and return the new label.
    ///
    /// Called at high frequency while dragging, so it touches nothing else.
    pub fn slide(&mut self, start: i64, end: i64) -> String {
        self.bounds = Bounds::clamped(start, end, &self.domain);
        self.label()
    }

    /// Value-change notification from the control. Intentionally a no-op.
    pub fn change(&mut self, _start: i64, _end: i64) {}

    /// Commit a selection: update the bounds, rebuild the link target and
    /// issue a ticket for the count request.
    pub fn commit(&mut self, start: i64, end: i64) -> FacetResult<Commit> {
        self.bounds = Bounds::clamped(start, end, &self.domain);

        let params = merged_params(&self.bounds, &self.domain, &self.params, &self.facet_field);
        let count_query = serialize_params(&params)?;
        let navigation_url = format!("{}?{}", self.base_url, count_query);

        self.href = navigation_url.clone();
        let ticket = self.counts.issue(self.bounds);

        tracing::debug!(seq = ticket.seq(), url = %navigation_url, "Committed range selection");

        Ok(Commit {
            bounds: self.bounds,
            label: self.label(),
            navigation_url,
            count_query,
            ticket,
        })
    }

    /// Apply the result of a count request issued by [`commit`](Self::commit).
    pub fn apply_count<E: std::fmt::Display>(
        &mut self,
        ticket: &CountTicket,
        result: Result<u64, E>,
    ) -> CountUpdate {
        self.counts.resolve(ticket, &self.bounds, result)
    }

    /// Last good result count.
    pub fn displayed_count(&self) -> Option<u64> {
        self.counts.displayed()
    }

    /// Count suffix shown after the label, e.g. `"(42)"`.
    pub fn count_text(&self) -> Option<String> {
        self.displayed_count().map(|count| format!("({})", count))
    }
}
