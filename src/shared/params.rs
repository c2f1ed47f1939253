//! Query-string codec.
//!
//! Parses and serializes the flat key/value parameter set of a URL query
//! component using form encoding (`+` for space, percent escapes for the
//! rest). Knows nothing about facets.

use crate::facet::error::{FacetError, FacetResult};

/// Ordered parameter map with unique keys.
///
/// Keys keep the position of their first insertion; overwriting a key
/// replaces its value in place. This keeps serialization deterministic.
/// Equality ignores order: two maps are equal when they hold the same pairs.
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    pairs: Vec<(String, String)>,
}

impl PartialEq for ParamMap {
    fn eq(&self, other: &Self) -> bool {
        // keys are unique, so equal length plus containment is set equality
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for ParamMap {}

impl ParamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Parse a query string into a [`ParamMap`].
///
/// A leading `?` is stripped. Segments without `=` get an empty value,
/// `+` decodes to a space, and the last occurrence of a duplicate key wins.
pub fn parse_params(query: &str) -> ParamMap {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return ParamMap::new();
    }

    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs.into_iter().collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse query string, ignoring it");
            ParamMap::new()
        }
    }
}

/// Parse `query`, or `location_search` when `query` is absent or empty.
///
/// `location_search` is the current page's search string, supplied by the
/// caller at the page-integration boundary.
pub fn parse_params_or(query: Option<&str>, location_search: &str) -> ParamMap {
    match query {
        Some(q) if !q.is_empty() => parse_params(q),
        _ => parse_params(location_search),
    }
}

/// Serialize a [`ParamMap`] as `key=value&key=value` in insertion order.
pub fn serialize_params(params: &ParamMap) -> FacetResult<String> {
    serde_urlencoded::to_string(params.as_slice()).map_err(|e| FacetError::QueryString(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let params = parse_params("?sort=price&page=2");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("sort"), Some("price"));
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_parse_without_question_mark() {
        let params = parse_params("sort=price");
        assert_eq!(params.get("sort"), Some("price"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_params("").is_empty());
        assert!(parse_params("?").is_empty());
    }

    #[test]
    fn test_parse_missing_equals_yields_empty_value() {
        let params = parse_params("?flag&q=trip");
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("q"), Some("trip"));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let params = parse_params("expr=a=b");
        assert_eq!(params.get("expr"), Some("a=b"));
    }

    #[test]
    fn test_parse_decodes_plus_and_percent() {
        let params = parse_params("?min_price=%5B50+TO+%2A%5D&q=hello%20world");
        assert_eq!(params.get("min_price"), Some("[50 TO *]"));
        assert_eq!(params.get("q"), Some("hello world"));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let params = parse_params("a=1&b=2&a=3");
        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(params.len(), 2);
        // first-seen position is kept
        assert_eq!(params.iter().next(), Some(("a", "3")));
    }

    #[test]
    fn test_parse_or_falls_back_to_location() {
        let params = parse_params_or(None, "?sort=relevance");
        assert_eq!(params.get("sort"), Some("relevance"));

        let params = parse_params_or(Some(""), "?sort=relevance");
        assert_eq!(params.get("sort"), Some("relevance"));

        let params = parse_params_or(Some("?page=3"), "?sort=relevance");
        assert_eq!(params.get("page"), Some("3"));
        assert!(!params.contains_key("sort"));
    }

    #[test]
    fn test_serialize_in_insertion_order() {
        let mut params = ParamMap::new();
        params.insert("sort", "relevance");
        params.insert("min_price", "[50 TO *]");
        assert_eq!(
            serialize_params(&params).unwrap(),
            "sort=relevance&min_price=%5B50+TO+*%5D"
        );
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut params: ParamMap = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.insert("a", "9"), Some("1".to_string()));
        assert_eq!(serialize_params(&params).unwrap(), "a=9&b=2");
        assert_eq!(params.remove("a"), Some("9".to_string()));
        assert_eq!(serialize_params(&params).unwrap(), "b=2");
    }

    #[test]
    fn test_roundtrip_with_spaces_and_symbols() {
        let params: ParamMap = [
            ("q", "cheap trips & tours"),
            ("region", "South America"),
            ("note", "100% = ok?"),
            ("empty", ""),
        ]
        .into_iter()
        .collect();
        let encoded = serialize_params(&params).unwrap();
        assert_eq!(parse_params(&encoded), params);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = parse_params("sort=price&page=2");
        let b = parse_params("page=2&sort=price");
        assert_eq!(a, b);
        assert_ne!(serialize_params(&a).unwrap(), serialize_params(&b).unwrap());

        assert_ne!(a, parse_params("sort=price&page=3"));
        assert_ne!(a, parse_params("sort=price"));
        assert_ne!(a, parse_params("sort=price&page=2&q="));
        assert_eq!(ParamMap::new(), parse_params("?"));
    }
}
