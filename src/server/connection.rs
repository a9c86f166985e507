// Connection handling
// One spawned task per accepted connection; connections share nothing but
// the immutable AppState

use crate::config::AppState;
use crate::handler;
use crate::http::isolation;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Serve one connection in its own task.
///
/// The service composes the isolation-header decorator around the request
/// handler, so every response on every path through the handler gets the
/// triplet stamped exactly once.
pub fn spawn(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = Duration::from_secs(state.config.http.request_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.http.keep_alive);

        let service_state = Arc::clone(&state);
        let connection = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move {
                    let response = handler::handle_request(req, state).await?;
                    Ok::<_, Infallible>(isolation::apply(response))
                }
            }),
        );

        if timeout.is_zero() {
            if let Err(e) = connection.await {
                tracing::debug!(%peer_addr, error = %e, "connection ended with error");
            }
            return;
        }

        match tokio::time::timeout(timeout, connection).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(%peer_addr, error = %e, "connection ended with error");
            }
            Err(_) => {
                tracing::warn!(
                    %peer_addr,
                    "connection timed out after {}s",
                    timeout.as_secs()
                );
            }
        }
    });
}
