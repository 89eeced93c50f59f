//! Deterministic cache keys for GET requests.

/// Builds the cache key for a request path and its query parameters.
///
/// Parameters are sorted by name, then by value, so callers that assemble
/// the same query in a different order share one cache entry.
pub fn cache_key(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let mut pairs = params.to_vec();
    pairs.sort_unstable();

    let query = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", path, query)
}
