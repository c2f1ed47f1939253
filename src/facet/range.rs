//! Range-facet codec.
//!
//! Converts between the textual range expression used by the search
//! backend (`[<low> TO <high>]`, `*` meaning unbounded) and numeric
//! [`Bounds`] within a [`Domain`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::facet::error::{FacetError, FacetResult};
use crate::shared::{Bounds, Domain};

/// Wildcard token for an unbounded side.
pub const WILDCARD: &str = "*";

/// One side of a range expression before it is resolved against a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Value(i64),
    Unbounded,
}

impl Endpoint {
    /// Resolve against a domain, mapping `Unbounded` to `fallback`.
    pub fn or(self, fallback: i64) -> i64 {
        match self {
            Endpoint::Value(v) => v,
            Endpoint::Unbounded => fallback,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Value(v) => write!(f, "{}", v),
            Endpoint::Unbounded => f.write_str(WILDCARD),
        }
    }
}

impl From<i64> for Endpoint {
    fn from(value: i64) -> Self {
        Endpoint::Value(value)
    }
}

/// `<low> TO <high>` with optional brackets and padding, `TO` in any case.
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\[?\s*(\S+?)\s+TO\s+(\S+?)\s*\]?\s*$").expect("range pattern compiles")
});

/// Preset forms recognized by [`humanize`], matched at the start of the input.
static LESS_THAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\* TO (\d*)\]").expect("less-than pattern compiles"));
static BETWEEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d*) TO (\d*)\]").expect("between pattern compiles"));
static AND_UP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d*) TO \*\]").expect("and-up pattern compiles"));

fn parse_endpoint(query: &str, token: &str) -> FacetResult<Endpoint> {
    if token == WILDCARD {
        return Ok(Endpoint::Unbounded);
    }
    token
        .parse::<i64>()
        .map(Endpoint::Value)
        .map_err(|_| FacetError::InvalidBound {
            query: query.to_string(),
            token: token.to_string(),
        })
}

/// Parse a range expression without resolving it against a domain.
///
/// Returns `None` when the input does not have the `<low> TO <high>` shape
/// (brackets and extra spaces are optional, `TO` is case-insensitive), and
/// an error when it does but a side is neither `*` nor an integer.
pub fn parse_raw(query: &str) -> Option<FacetResult<(Endpoint, Endpoint)>> {
    let caps = RANGE_RE.captures(query)?;
    Some(parse_endpoint(query, &caps[1]).and_then(|low| {
        let high = parse_endpoint(query, &caps[2])?;
        Ok((low, high))
    }))
}

/// Decode a facet query into bounds.
///
/// Absent or non-matching input yields the full domain. A `*` maps to the
/// corresponding domain edge and values outside the domain are clamped.
pub fn decode(query: Option<&str>, domain: &Domain) -> FacetResult<Bounds> {
    let Some(query) = query else {
        return Ok(Bounds::full(domain));
    };

    let (low, high) = match parse_raw(query) {
        Some(parsed) => parsed?,
        None => {
            tracing::debug!(query, "Facet query is not a range, using full domain");
            return Ok(Bounds::full(domain));
        }
    };

    let start = low.or(domain.min());
    let end = high.or(domain.max());
    if start > end {
        return Err(FacetError::InvertedRange { start, end });
    }

    let bounds = Bounds::clamped(start, end, domain);
    if bounds.start() != start || bounds.end() != end {
        tracing::debug!(
            start,
            end,
            min = domain.min(),
            max = domain.max(),
            "Clamped facet range into domain"
        );
    }
    Ok(bounds)
}

/// Decode a facet query, falling back to the full domain on any error.
pub fn decode_or_full(query: Option<&str>, domain: &Domain) -> Bounds {
    decode(query, domain).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Malformed facet query, using full domain");
        Bounds::full(domain)
    })
}

/// Encode bounds as a range expression.
///
/// Only the upper bound can become `*`: an `end` equal to `domain.max`
/// means "this value or more" to the search backend.
pub fn encode(bounds: &Bounds, domain: &Domain) -> String {
    let upper = if bounds.is_open_ended(domain) {
        Endpoint::Unbounded
    } else {
        Endpoint::Value(bounds.end())
    };
    format!("[{} TO {}]", bounds.start(), upper)
}

/// Human readable form of a preset range expression.
///
/// `[* TO 5]` reads "Less than 5", `[6 TO 10]` reads "6 to 10" and
/// `[41 TO *]` reads "41 and up". The forms are matched at the start of the
/// input, so trailing text is ignored. Anything else is returned unchanged.
pub fn humanize(query: &str) -> String {
    if let Some(caps) = LESS_THAN_RE.captures(query) {
        format!("Less than {}", &caps[1])
    } else if let Some(caps) = BETWEEN_RE.captures(query) {
        format!("{} to {}", &caps[1], &caps[2])
    } else if let Some(caps) = AND_UP_RE.captures(query) {
        format!("{} and up", &caps[1])
    } else {
        query.to_string()
    }
}

/// Numeric sort key of a preset range expression: its lower token, with
/// `*` counting as zero.
pub fn sort_key(query: &str) -> Option<i64> {
    let inner = query.trim_start_matches('[').trim_end_matches(']');
    let first = inner.split_whitespace().next()?;
    first.replace(WILDCARD, "0").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Domain {
        Domain::new(0, 500).unwrap()
    }

    fn bounds(start: i64, end: i64) -> Bounds {
        Bounds::new(start, end, &domain()).unwrap()
    }

    #[test]
    fn test_decode_basic() {
        let decoded = decode(Some("[100 TO 300]"), &domain()).unwrap();
        assert_eq!(decoded, bounds(100, 300));
    }

    #[test]
    fn test_decode_open_upper() {
        let decoded = decode(Some("[200 TO *]"), &domain()).unwrap();
        assert_eq!(decoded, bounds(200, 500));
    }

    #[test]
    fn test_decode_open_lower() {
        let decoded = decode(Some("[* TO 250]"), &domain()).unwrap();
        assert_eq!(decoded, bounds(0, 250));
    }

    #[test]
    fn test_decode_case_and_spacing() {
        assert_eq!(
            decode(Some("100 to 300"), &domain()).unwrap(),
            bounds(100, 300)
        );
        assert_eq!(
            decode(Some("[ 100   To 300 ]"), &domain()).unwrap(),
            bounds(100, 300)
        );
    }

    #[test]
    fn test_decode_fallbacks() {
        let full = Bounds::full(&domain());
        assert_eq!(decode(None, &domain()).unwrap(), full);
        assert_eq!(decode(Some("garbage"), &domain()).unwrap(), full);
        assert_eq!(decode(Some(""), &domain()).unwrap(), full);
        assert_eq!(decode(Some("[TO 5]"), &domain()).unwrap(), full);
        assert_eq!(decode(Some("[1 TO 2 TO 3]"), &domain()).unwrap(), full);
    }

    #[test]
    fn test_decode_invalid_bound() {
        let err = decode(Some("[abc TO 300]"), &domain()).unwrap_err();
        assert_eq!(
            err,
            FacetError::InvalidBound {
                query: "[abc TO 300]".to_string(),
                token: "abc".to_string(),
            }
        );
        assert!(decode(Some("[10.5 TO 300]"), &domain()).is_err());
    }

    #[test]
    fn test_decode_inverted() {
        let err = decode(Some("[300 TO 100]"), &domain()).unwrap_err();
        assert_eq!(err, FacetError::InvertedRange { start: 300, end: 100 });
    }

    #[test]
    fn test_decode_clamps_into_domain() {
        assert_eq!(
            decode(Some("[100 TO 900]"), &domain()).unwrap(),
            bounds(100, 500)
        );
    }

    #[test]
    fn test_decode_with_deserialized_domain() {
        let domain: Domain = serde_json::from_str(r#"{"min":0,"max":500}"#).unwrap();
        assert_eq!(decode_or_full(Some("[1 TO 2]"), &domain), bounds(1, 2));
        assert_eq!(decode_or_full(Some("[-50 TO 9000]"), &domain), Bounds::full(&domain));
    }

    #[test]
    fn test_decode_or_full() {
        assert_eq!(decode_or_full(Some("[x TO 1]"), &domain()), Bounds::full(&domain()));
        assert_eq!(decode_or_full(Some("[400 TO 1]"), &domain()), Bounds::full(&domain()));
        assert_eq!(
            decode_or_full(Some("[1 TO 2]"), &domain()),
            bounds(1, 2)
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&bounds(100, 300), &domain()), "[100 TO 300]");
        assert_eq!(encode(&bounds(200, 500), &domain()), "[200 TO *]");
        // lower bound never becomes a wildcard
        assert_eq!(encode(&bounds(0, 100), &domain()), "[0 TO 100]");
        assert_eq!(encode(&Bounds::full(&domain()), &domain()), "[0 TO *]");
    }

    #[test]
    fn test_roundtrip_across_domain() {
        let domain = Domain::new(0, 20).unwrap();
        for start in domain.min()..=domain.max() {
            for end in start..=domain.max() {
                let bounds = Bounds::new(start, end, &domain).unwrap();
                assert_eq!(decode(Some(encode(&bounds, &domain).as_str()), &domain).unwrap(), bounds);
            }
        }
    }

    #[test]
    fn test_parse_raw() {
        assert_eq!(
            parse_raw("[5 TO *]"),
            Some(Ok((Endpoint::Value(5), Endpoint::Unbounded)))
        );
        assert_eq!(parse_raw("nothing here"), None);
        assert!(matches!(parse_raw("[5 TO x]"), Some(Err(_))));
    }

    #[test]
    fn test_parse_raw_shapes() {
        let expected = Some(Ok((Endpoint::Value(100), Endpoint::Value(300))));
        assert_eq!(parse_raw("[100 TO 300]"), expected);
        assert_eq!(parse_raw("  [100 to 300]  "), expected);
        assert_eq!(parse_raw("100 tO 300"), expected);
        assert_eq!(parse_raw("[ -20 TO 300 ]"), Some(Ok((Endpoint::Value(-20), Endpoint::Value(300)))));
        assert_eq!(parse_raw("[* TO *]"), Some(Ok((Endpoint::Unbounded, Endpoint::Unbounded))));

        // TO must be a separate word
        assert_eq!(parse_raw("[100TO300]"), None);
        assert_eq!(parse_raw("tomatoes"), None);
        assert_eq!(parse_raw("[100 TO]"), None);
        assert_eq!(parse_raw("[1 TO 2 TO 3]"), None);
    }

    #[test]
    fn test_parse_raw_reports_offending_token() {
        assert_eq!(
            parse_raw("[5 TO 1e3]"),
            Some(Err(FacetError::InvalidBound {
                query: "[5 TO 1e3]".to_string(),
                token: "1e3".to_string(),
            }))
        );
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("[* TO 5]"), "Less than 5");
        assert_eq!(humanize("[6 TO 10]"), "6 to 10");
        assert_eq!(humanize("[41 TO *]"), "41 and up");
        assert_eq!(humanize("Africa"), "Africa");
        assert_eq!(humanize("[* TO *]"), "[* TO *]");
    }

    #[test]
    fn test_humanize_ignores_trailing_text() {
        assert_eq!(humanize("[1 TO 2]x"), "1 to 2");
        assert_eq!(humanize("[* TO 5] (sale)"), "Less than 5");
        assert_eq!(humanize("[41 TO *]]"), "41 and up");
        assert_eq!(humanize(" [1 TO 2]"), " [1 TO 2]");
    }

    #[test]
    fn test_sort_key() {
        let mut presets = vec!["[2001 TO *]", "[500 TO 1000]", "[* TO 500]", "[1001 TO 2000]"];
        presets.sort_by_key(|q| sort_key(q));
        assert_eq!(presets, vec!["[* TO 500]", "[500 TO 1000]", "[1001 TO 2000]", "[2001 TO *]"]);
        assert_eq!(sort_key("Austria"), None);
    }
}
