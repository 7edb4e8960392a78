// Listener module
// Creates the TCP listener the accept loop runs on

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Listen backlog passed to `listen(2)`
const BACKLOG: i32 = 128;

/// Create a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// Lets a restarted dev server rebind right away while the previous
/// process's sockets are still in `TIME_WAIT`.
///
/// # Arguments
///
/// * `addr` - The socket address to bind to
pub fn create_reusable_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    // socket2::Socket -> std::net::TcpListener -> tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Resolve and bind the configured `hostname:port`
///
/// A failure is logged as a listener error and yields `None`; it is not
/// propagated as a process error.
pub async fn bind_listener(config: &Config) -> Option<TcpListener> {
    match resolve_and_bind(config).await {
        Ok(listener) => Some(listener),
        Err(e) => {
            logger::log_listener_error(&e);
            None
        }
    }
}

async fn resolve_and_bind(config: &Config) -> std::io::Result<TcpListener> {
    let addr = config.resolve_socket_addr().await?;
    create_reusable_listener(addr)
}
