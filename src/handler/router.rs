//! Request entry point: method gating and dispatch to the file server.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{response, Body};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Per-request data extracted up front so the serving code doesn't carry the
/// hyper request around
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Handle one HTTP request.
///
/// Never fails: every outcome, including errors, becomes a response, and the
/// isolation decorator in the connection layer stamps all of them.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method();
    let path = req.uri().path();

    let response = match method {
        &Method::GET | &Method::HEAD => {
            let ctx = RequestContext {
                path,
                is_head: *method == Method::HEAD,
                if_none_match: header_value(&req, "if-none-match"),
                range_header: header_value(&req, "range"),
            };
            static_files::serve(&ctx, &state).await
        }
        &Method::OPTIONS => response::options_no_content(),
        _ => {
            tracing::debug!(%method, path, "method not allowed");
            response::method_not_allowed()
        }
    };

    if state.config.logging.access_log {
        let bytes = response
            .headers()
            .get("Content-Length")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        tracing::info!(
            target: "sitekit::access",
            "{method} {path} {} {bytes}",
            response.status().as_u16()
        );
    }

    Ok(response)
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
