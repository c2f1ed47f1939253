//! Result count ordering.
//!
//! Count requests resolve in any order. Each request carries a
//! [`CountTicket`]; only the ticket for the most recent commit, whose bounds
//! still match the current selection, may update the displayed count.

use std::fmt::Display;

use crate::shared::Bounds;

/// Tag attached to a single count request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountTicket {
    seq: u64,
    bounds: Bounds,
}

impl CountTicket {
    /// Sequence number, increasing with every commit
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Bounds the request was issued for
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Outcome of resolving a count request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountUpdate {
    /// The count was accepted and is now displayed
    Applied(u64),
    /// A newer request or selection superseded this one; result dropped
    Stale,
    /// The request failed; the previous count stays displayed
    Failed,
}

/// Tracks issued count requests and the last accepted count.
#[derive(Debug, Clone, Default)]
pub struct CountTracker {
    /// Last good count
    displayed: Option<u64>,
    /// Sequence number of the next ticket
    next_seq: u64,
    /// Sequence number of the most recently issued ticket
    latest_seq: Option<u64>,
}

impl CountTracker {
    /// Create a tracker showing an initial count.
    pub fn new(initial: Option<u64>) -> Self {
        Self {
            displayed: initial,
            ..Default::default()
        }
    }

    /// Issue a ticket for a request made at `bounds`.
    pub fn issue(&mut self, bounds: Bounds) -> CountTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_seq = Some(seq);
        CountTicket { seq, bounds }
    }

    /// Resolve a request against the current selection.
    pub fn resolve<E: Display>(
        &mut self,
        ticket: &CountTicket,
        current: &Bounds,
        result: Result<u64, E>,
    ) -> CountUpdate {
        if self.latest_seq != Some(ticket.seq) || ticket.bounds != *current {
            tracing::debug!(
                seq = ticket.seq,
                latest_seq = ?self.latest_seq,
                "Discarding stale count response"
            );
            return CountUpdate::Stale;
        }

        match result {
            Ok(count) => {
                self.displayed = Some(count);
                CountUpdate::Applied(count)
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq, error = %e, "Count refresh failed, keeping previous count");
                CountUpdate::Failed
            }
        }
    }

    /// Last good count, if any.
    pub fn displayed(&self) -> Option<u64> {
        self.displayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::shared::Domain;

    fn bounds(start: i64, end: i64) -> Bounds {
        Bounds::new(start, end, &Domain::new(0, 500).unwrap()).unwrap()
    }

    #[test]
    fn test_applies_latest() {
        let mut tracker = CountTracker::new(Some(10));
        let ticket = tracker.issue(bounds(0, 100));
        let update = tracker.resolve(&ticket, &bounds(0, 100), Ok::<_, String>(42));
        assert_eq!(update, CountUpdate::Applied(42));
        assert_eq!(tracker.displayed(), Some(42));
    }

    #[test]
    fn test_out_of_order_responses() {
        let mut tracker = CountTracker::new(Some(10));
        let first = tracker.issue(bounds(0, 100));
        let second = tracker.issue(bounds(0, 200));
        let current = bounds(0, 200);

        assert_eq!(
            tracker.resolve(&second, &current, Ok::<_, String>(7)),
            CountUpdate::Applied(7)
        );
        assert_eq!(
            tracker.resolve(&first, &current, Ok::<_, String>(99)),
            CountUpdate::Stale
        );
        assert_eq!(tracker.displayed(), Some(7));
    }

    #[test]
    fn test_bounds_moved_since_request() {
        let mut tracker = CountTracker::new(None);
        let ticket = tracker.issue(bounds(0, 100));
        assert_eq!(
            tracker.resolve(&ticket, &bounds(0, 150), Ok::<_, String>(5)),
            CountUpdate::Stale
        );
        assert_eq!(tracker.displayed(), None);
    }

    #[test]
    fn test_failure_keeps_previous() {
        let mut tracker = CountTracker::new(Some(10));
        let ticket = tracker.issue(bounds(0, 100));
        assert_eq!(
            tracker.resolve(&ticket, &bounds(0, 100), Err("boom")),
            CountUpdate::Failed
        );
        assert_eq!(tracker.displayed(), Some(10));
    }

    #[test]
    fn test_sequence_increases() {
        let mut tracker = CountTracker::default();
        let a = tracker.issue(bounds(0, 1));
        let b = tracker.issue(bounds(0, 1));
        assert!(b.seq() > a.seq());
        assert_eq!(a.bounds(), bounds(0, 1));
    }
}
