//! Conditional-request helpers: `ETag` generation, `If-None-Match`
//! evaluation, and HTTP-date formatting for `Last-Modified`.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Generate a quoted `ETag` from file content.
///
/// A content hash, not a strong digest; collisions only cost a spurious 304
/// for a client that already held the colliding tag.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether a client's `If-None-Match` header matches our `ETag`.
///
/// Handles single tags, comma-separated lists, and the `*` wildcard.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}

/// Format a timestamp as an IMF-fixdate for the `Last-Modified` header,
/// e.g. `Tue, 05 Aug 2025 17:03:00 GMT`.
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
