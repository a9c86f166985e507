//! HTTP response builders, one per status the file server can produce.

use crate::http::range::ByteRange;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Response body type used throughout the server
pub type Body = Full<Bytes>;

const CACHE_CONTROL: &str = "public, max-age=3600";

/// Build 404 Not Found
pub fn not_found() -> Response<Body> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| fallback("404", &e))
}

/// Build 405 Method Not Allowed
pub fn method_not_allowed() -> Response<Body> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| fallback("405", &e))
}

/// Build the 204 answer to an OPTIONS request
pub fn options_no_content() -> Response<Body> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("204", &e))
}

/// Build 304 Not Modified for a matching `If-None-Match`
pub fn not_modified(etag: &str) -> Response<Body> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("304", &e))
}

/// Build 416 Range Not Satisfiable
pub fn range_not_satisfiable(file_size: usize) -> Response<Body> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| fallback("416", &e))
}

/// Build 301 Moved Permanently (directory requests missing their trailing slash)
pub fn moved_permanently(location: &str) -> Response<Body> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("Moved Permanently")))
        .unwrap_or_else(|e| fallback("301", &e))
}

/// Build a 200 HTML page (directory listings)
pub fn html_page(content: String, is_head: bool) -> Response<Body> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("200", &e))
}

/// Build 200 with the whole file
pub fn file_full(
    content: Vec<u8>,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Body> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL);
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("200", &e))
}

/// Build 206 with a slice of the file
pub fn file_partial(
    slice: Vec<u8>,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    range: ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Body> {
    let content_length = range.byte_count();
    let body = if is_head { Bytes::new() } else { Bytes::from(slice) };

    let mut builder = Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header(
            "Content-Range",
            format!("bytes {}-{}/{total_size}", range.start, range.end),
        )
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL);
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("206", &e))
}

/// A builder failure here means a malformed header value; serve an empty
/// response instead of crashing the connection task.
fn fallback(status: &str, error: &hyper::http::Error) -> Response<Body> {
    tracing::error!("failed to build {status} response: {error}");
    Response::new(Full::new(Bytes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_shape() {
        let response = not_found();
        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn method_not_allowed_lists_allowed_methods() {
        let response = method_not_allowed();
        assert_eq!(response.status(), 405);
        assert_eq!(
            response.headers().get("Allow").unwrap(),
            "GET, HEAD, OPTIONS"
        );
    }

    #[test]
    fn full_file_carries_caching_headers() {
        let response = file_full(
            b"body".to_vec(),
            "text/plain; charset=utf-8",
            "\"tag\"",
            Some("Fri, 02 Jan 1970 00:00:00 GMT"),
            false,
        );
        assert_eq!(response.status(), 200);
        let headers = response.headers();
        assert_eq!(headers.get("Content-Length").unwrap(), "4");
        assert_eq!(headers.get("ETag").unwrap(), "\"tag\"");
        assert_eq!(headers.get("Accept-Ranges").unwrap(), "bytes");
        assert_eq!(
            headers.get("Last-Modified").unwrap(),
            "Fri, 02 Jan 1970 00:00:00 GMT"
        );
    }

    #[test]
    fn head_keeps_content_length_but_drops_body() {
        let response = file_full(b"body".to_vec(), "text/plain", "\"tag\"", None, true);
        assert_eq!(response.headers().get("Content-Length").unwrap(), "4");
        // Full<Bytes> exposes its size hint; an empty body reports 0
        assert_eq!(
            hyper::body::Body::size_hint(response.body()).exact(),
            Some(0)
        );
    }

    #[test]
    fn partial_file_reports_the_range() {
        let range = ByteRange { start: 2, end: 5 };
        let response = file_partial(
            b"cdef".to_vec(),
            "application/octet-stream",
            "\"tag\"",
            None,
            range,
            10,
            false,
        );
        assert_eq!(response.status(), 206);
        assert_eq!(
            response.headers().get("Content-Range").unwrap(),
            "bytes 2-5/10"
        );
        assert_eq!(response.headers().get("Content-Length").unwrap(), "4");
    }
}
