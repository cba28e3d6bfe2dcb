use std::time::Duration;

use rconprims_frame::{FrameError, PacketType};
use rconprims_transport::TransportError;

/// How a reply failed to match the request it answers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    /// The reply carried a different packet type than the exchange expects.
    #[error("expected packet type {expected} but got {actual}")]
    UnexpectedType { expected: PacketType, actual: u32 },

    /// The reply answered a different request id.
    #[error("expected packet id {expected} but got {actual}")]
    UnexpectedId { expected: u32, actual: u32 },

    /// The server answered the auth request with id -1.
    #[error("authentication rejected by server")]
    AuthRejected,
}

/// Errors that can occur in RCON client operations.
#[derive(Debug, thiserror::Error)]
pub enum RconError {
    /// Hostname lookup failed or yielded no usable address.
    #[error("resolution failed: {0}")]
    Resolution(#[source] TransportError),

    /// Opening the TCP connection failed.
    #[error("connect failed: {0}")]
    Connect(#[source] TransportError),

    /// Sending, receiving or waiting on the socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No reply arrived within the timeout.
    #[error("timed out waiting for packet after {0:?}")]
    Timeout(Duration),

    /// A reply arrived but does not answer the request.
    #[error("protocol mismatch: {0}")]
    ProtocolMismatch(#[from] Mismatch),

    /// The server closed the connection or sent an undecodable packet.
    #[error("frame error: {0}")]
    Frame(#[source] FrameError),
}

/// Fieldless view of [`RconError`] for matching on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolution,
    Connect,
    Io,
    Timeout,
    ProtocolMismatch,
}

impl RconError {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RconError::Resolution(_) => ErrorKind::Resolution,
            RconError::Connect(_) => ErrorKind::Connect,
            RconError::Io(_) | RconError::Frame(_) => ErrorKind::Io,
            RconError::Timeout(_) => ErrorKind::Timeout,
            RconError::ProtocolMismatch(_) => ErrorKind::ProtocolMismatch,
        }
    }

    /// Whether the server explicitly refused the password.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, RconError::ProtocolMismatch(Mismatch::AuthRejected))
    }
}

impl From<TransportError> for RconError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Resolve { .. } | TransportError::NoAddress { .. } => {
                RconError::Resolution(err)
            }
            TransportError::Connect { .. } => RconError::Connect(err),
            TransportError::Io(io) => RconError::Io(io),
        }
    }
}

impl From<FrameError> for RconError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(io) => RconError::Io(io),
            other => RconError::Frame(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RconError>;

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::*;

    #[test]
    fn transport_errors_map_to_taxonomy() {
        let resolve: RconError = TransportError::NoAddress {
            host: "example".to_string(),
        }
        .into();
        assert_eq!(resolve.kind(), ErrorKind::Resolution);

        let connect: RconError = TransportError::Connect {
            addr: "127.0.0.1:1".parse::<SocketAddr>().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        }
        .into();
        assert_eq!(connect.kind(), ErrorKind::Connect);

        let io: RconError =
            TransportError::Io(std::io::Error::from(std::io::ErrorKind::Other)).into();
        assert!(matches!(io, RconError::Io(_)));
    }

    #[test]
    fn frame_errors_map_to_io_kind() {
        let io: RconError = FrameError::Io(std::io::Error::from(std::io::ErrorKind::BrokenPipe)).into();
        assert!(matches!(io, RconError::Io(_)));

        let closed: RconError = FrameError::ConnectionClosed.into();
        assert!(matches!(closed, RconError::Frame(FrameError::ConnectionClosed)));
        assert_eq!(closed.kind(), ErrorKind::Io);
    }

    #[test]
    fn mismatch_messages() {
        let err = RconError::from(Mismatch::UnexpectedType {
            expected: PacketType::ResponseValue,
            actual: 2,
        });
        assert_eq!(
            err.to_string(),
            "protocol mismatch: expected packet type SERVERDATA_RESPONSE_VALUE (0) but got 2"
        );
        assert_eq!(err.kind(), ErrorKind::ProtocolMismatch);
        assert!(!err.is_auth_rejected());
        assert!(RconError::from(Mismatch::AuthRejected).is_auth_rejected());
    }

    #[test]
    fn timeout_kind() {
        let err = RconError::Timeout(Duration::from_millis(100));
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(err.to_string().contains("timed out"));
    }
}
