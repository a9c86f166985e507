// Listener construction
// socket2 gives us SO_REUSEADDR and an explicit backlog before handing the
// socket to tokio

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Bind a TCP listener on `addr`.
///
/// `SO_REUSEADDR` lets a restart rebind a port still in `TIME_WAIT`, but a
/// port actively held by another process still fails to bind: that failure
/// is fatal and surfaces at startup. Must be called from within a tokio
/// runtime.
pub fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
