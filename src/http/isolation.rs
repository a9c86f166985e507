//! Cross-origin isolation headers.
//!
//! The animator page runs FFmpeg.wasm, and browsers only hand out
//! `SharedArrayBuffer` (and other powerful APIs) to pages served from a
//! cross-origin-isolated context. Isolation is granted when every response
//! carries the COOP/COEP/CORP triplet, so this is applied as a decorator
//! around the request handler rather than inside any particular branch.

use hyper::header::{HeaderName, HeaderValue};
use hyper::Response;

/// The header triplet browsers require for cross-origin isolation
pub const ISOLATION_HEADERS: [(&str, &str); 3] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-embedder-policy", "require-corp"),
    ("cross-origin-resource-policy", "cross-origin"),
];

/// Stamp the isolation triplet onto a response.
///
/// Uses `insert`, not `append`, so each header appears exactly once no
/// matter which handler path built the response.
pub fn apply<B>(mut response: Response<B>) -> Response<B> {
    let headers = response.headers_mut();
    for (name, value) in ISOLATION_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}
