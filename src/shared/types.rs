//! Shared type definitions for the price facet.
//!
//! This module contains the numeric range types used by the codec, the
//! selection state and the count client.

use serde::{Deserialize, Serialize};

use crate::facet::error::{FacetError, FacetResult};

// ============================================================================
// Domain
// ============================================================================

/// Fixed numeric range a facet control can represent.
///
/// Set once per page from configuration and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDomain")]
pub struct Domain {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawDomain {
    min: i64,
    max: i64,
}

impl TryFrom<RawDomain> for Domain {
    type Error = FacetError;

    fn try_from(raw: RawDomain) -> FacetResult<Self> {
        Domain::new(raw.min, raw.max)
    }
}

impl Domain {
    /// Create a new domain, rejecting `min > max`.
    pub fn new(min: i64, max: i64) -> FacetResult<Self> {
        if min > max {
            return Err(FacetError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lowest selectable value.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Highest selectable value; selecting it means "this value or more".
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Clamp a value into the domain.
    pub fn clamp(&self, value: i64) -> i64 {
        value.max(self.min).min(self.max)
    }

    /// Check whether a value lies inside the domain.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Currently selected sub-range of a [`Domain`].
///
/// Invariant: `domain.min <= start <= end <= domain.max`. An `end` equal to
/// `domain.max` is the open-upper sentinel and encodes as `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    start: i64,
    end: i64,
}

/// Deserialized bounds are only checked for order; the domain is not
/// known at that point.
#[derive(Deserialize)]
struct RawBounds {
    start: i64,
    end: i64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = FacetError;

    fn try_from(raw: RawBounds) -> FacetResult<Self> {
        if raw.start > raw.end {
            return Err(FacetError::InvertedRange {
                start: raw.start,
                end: raw.end,
            });
        }
        Ok(Self {
            start: raw.start,
            end: raw.end,
        })
    }
}

impl Bounds {
    /// Create bounds, validating them against the domain.
    pub fn new(start: i64, end: i64, domain: &Domain) -> FacetResult<Self> {
        if start > end {
            return Err(FacetError::InvertedRange { start, end });
        }
        if !domain.contains(start) || !domain.contains(end) {
            return Err(FacetError::OutOfDomain {
                start,
                end,
                min: domain.min,
                max: domain.max,
            });
        }
        Ok(Self { start, end })
    }

    /// Lower bound.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Upper bound.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The unconstrained selection covering the whole domain.
    pub fn full(domain: &Domain) -> Self {
        Self {
            start: domain.min,
            end: domain.max,
        }
    }

    /// Build bounds from control-supplied values, clamping them into the
    /// domain and ordering them.
    pub fn clamped(start: i64, end: i64, domain: &Domain) -> Self {
        let (start, end) = (domain.clamp(start), domain.clamp(end));
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Whether the upper bound is open (equal to the domain maximum).
    pub fn is_open_ended(&self, domain: &Domain) -> bool {
        self.end == domain.max
    }

    /// Whether these bounds cover the full domain.
    pub fn is_full(&self, domain: &Domain) -> bool {
        self.start == domain.min && self.end == domain.max
    }
}
