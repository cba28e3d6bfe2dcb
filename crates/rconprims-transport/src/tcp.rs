use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Result, TransportError};
use crate::stream::RconStream;

/// Resolve `host` to a single IPv4 stream address.
///
/// Only IPv4 candidates are considered. When more than one resolves, the
/// first is used and a warning is logged; the others are never tried.
pub fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddr> {
    let candidates: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| TransportError::Resolve {
            host: host.to_string(),
            source,
        })?
        .filter(SocketAddr::is_ipv4)
        .collect();

    let Some(first) = candidates.first().copied() else {
        return Err(TransportError::NoAddress {
            host: host.to_string(),
        });
    };

    if candidates.len() > 1 {
        warn!(
            host,
            count = candidates.len(),
            using = %first,
            "hostname resolved to multiple IP addresses"
        );
    }

    Ok(first)
}

/// Resolve `host` and open a TCP connection to it (blocking).
///
/// With `connect_timeout` set the connect syscall is bounded; otherwise the
/// OS default applies. Nothing is left open when this fails.
pub fn connect(host: &str, port: u16, connect_timeout: Option<Duration>) -> Result<RconStream> {
    let addr = resolve_ipv4(host, port)?;
    debug!(host, %addr, "connecting");

    let stream = match connect_timeout {
        Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
        None => TcpStream::connect(addr),
    }
    .map_err(|source| TransportError::Connect { addr, source })?;

    debug!(%addr, "connected");
    Ok(RconStream::from_tcp(stream))
}
