use std::net::SocketAddr;

/// Errors that can occur in RCON transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Hostname lookup failed.
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        source: std::io::Error,
    },

    /// Hostname lookup succeeded but yielded no IPv4 stream address.
    #[error("no IPv4 address found for {host}")]
    NoAddress { host: String },

    /// Failed to connect to the resolved address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
