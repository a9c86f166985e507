//! Static file serving: request-path resolution under the document root,
//! index-file probing, and conditional/ranged responses.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::range::RangeOutcome;
use crate::http::{cache, mime, range, response, Body};
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

enum Resolved {
    File(PathBuf),
    Listing(PathBuf),
    Redirect(String),
    NotFound,
}

/// Serve a GET/HEAD request from the document root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Body> {
    match resolve(state, ctx.path) {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Listing(dir) => listing::render(ctx, &dir).await,
        Resolved::Redirect(location) => response::moved_permanently(&location),
        Resolved::NotFound => response::not_found(),
    }
}

/// Map a request path to a file, a listable directory, a redirect, or a 404.
fn resolve(state: &AppState, request_path: &str) -> Resolved {
    // Neutralize parent-directory components up front; the canonicalized
    // containment check below is the guard that actually holds.
    let relative = request_path.trim_start_matches('/').replace("..", "");

    let Ok(target) = state.root.join(relative).canonicalize() else {
        return Resolved::NotFound;
    };
    if !target.starts_with(&state.root) {
        tracing::warn!(path = request_path, "path traversal attempt blocked");
        return Resolved::NotFound;
    }

    if !target.is_dir() {
        return Resolved::File(target);
    }

    // Relative links inside a listing or index page only resolve when the
    // directory URL ends with a slash
    if !request_path.ends_with('/') {
        return Resolved::Redirect(format!("{request_path}/"));
    }

    for index in &state.config.http.index_files {
        let candidate = target.join(index);
        if candidate.is_file() {
            return Resolved::File(candidate);
        }
    }

    if state.config.http.directory_listing {
        Resolved::Listing(target)
    } else {
        Resolved::NotFound
    }
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Body> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read file");
            return response::not_found();
        }
    };

    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
    let etag = cache::generate_etag(&content);
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return response::not_modified(&etag);
    }

    let last_modified = fs::metadata(path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(cache::http_date);

    let total_size = content.len();
    match range::parse(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(byte_range) => response::file_partial(
            content[byte_range.start..=byte_range.end].to_vec(),
            content_type,
            &etag,
            last_modified.as_deref(),
            byte_range,
            total_size,
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => response::range_not_satisfiable(total_size),
        RangeOutcome::Full => response::file_full(
            content,
            content_type,
            &etag,
            last_modified.as_deref(),
            ctx.is_head,
        ),
    }
}
