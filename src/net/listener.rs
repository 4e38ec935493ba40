// ────────────────────────────────
// src/net/listener.rs
// Low‑level TCP listener setup: reuse‑addr, bind, non‑blocking, listen.
// ────────────────────────────────
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use tracing::info;

use crate::config::{ListenerConfig, DEFAULT_BACKLOG};

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Failed to resolve {0}: {1}")]
    Resolve(String, #[source] io::Error),

    #[error("Failed to create socket: {0}")]
    Socket(#[source] io::Error),

    #[error("Failed to configure socket for {0}: {1}")]
    Configure(SocketAddr, #[source] io::Error),

    #[error("Failed to bind {0}: {1}")]
    Bind(SocketAddr, #[source] io::Error),

    #[error("Failed to listen on {0}: {1}")]
    Listen(SocketAddr, #[source] io::Error),
}

/// Returns a listening socket bound to `(host, port)`.
///
/// The socket is IPv4, stream-oriented, reuse-addr enabled, non-blocking,
/// and listening with a queue depth of [`DEFAULT_BACKLOG`]. No connection
/// has been accepted yet; releasing the socket is the caller's
/// responsibility. Errors from the OS are propagated unmodified in the
/// error source.
pub fn create_listener(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    create_listener_with(host, port, DEFAULT_BACKLOG)
}

/// Same setup sequence, with host, port and queue depth taken from
/// configuration.
pub fn create_listener_from(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    create_listener_with(&config.host, config.port, config.backlog)
}

fn create_listener_with(host: &str, port: u16, backlog: i32) -> Result<TcpListener, ListenerError> {
    let addr = resolve_ipv4(host, port)?;

    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .map_err(ListenerError::Socket)?;

    // Avoids "address already in use" when rebinding while the previous
    // socket is still in TIME_WAIT.
    socket
        .set_reuse_address(true)
        .map_err(|e| ListenerError::Configure(addr, e))?;

    socket
        .bind(&SockAddr::from(addr))
        .map_err(|e| ListenerError::Bind(addr, e))?;

    // accept() must return WouldBlock instead of suspending; readiness is
    // the caller's event mechanism's job.
    socket
        .set_nonblocking(true)
        .map_err(|e| ListenerError::Configure(addr, e))?;

    socket
        .listen(backlog)
        .map_err(|e| ListenerError::Listen(addr, e))?;

    let listener: TcpListener = socket.into();
    let bound = listener
        .local_addr()
        .map_err(|e| ListenerError::Configure(addr, e))?;
    info!("Server listening on {}:{}", bound.ip(), bound.port());

    Ok(listener)
}

/// Register a non-blocking listener with the tokio runtime.
///
/// Must be called from within a runtime context. The handle returned by
/// [`create_listener`] is already non-blocking, which is what
/// `TcpListener::from_std` requires.
pub fn into_async(listener: TcpListener) -> io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::from_std(listener)
}

/// Resolve `(host, port)` to the first IPv4 address it yields.
fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddr, ListenerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| ListenerError::Resolve(format!("{host}:{port}"), e))?;

    addrs.find(|a| a.is_ipv4()).ok_or_else(|| {
        ListenerError::Resolve(
            format!("{host}:{port}"),
            io::Error::new(io::ErrorKind::AddrNotAvailable, "no IPv4 address for host"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numeric_address() {
        let addr = resolve_ipv4("127.0.0.1", 4242).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:4242");
    }

    #[test]
    fn resolves_hostname_to_ipv4() {
        let addr = resolve_ipv4("localhost", 0).unwrap();
        assert!(addr.is_ipv4());
    }

    #[test]
    fn unresolvable_host_is_a_resolve_error() {
        let err = resolve_ipv4("host.invalid", 0).unwrap_err();
        assert!(matches!(err, ListenerError::Resolve(_, _)));
    }
}
