/// Errors that can occur during packet encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Fewer bytes than the smallest valid packet were received.
    #[error("truncated packet ({len} bytes, min {min})")]
    Truncated { len: usize, min: usize },

    /// The size field disagrees with the number of bytes read.
    #[error("packet size field {declared} does not match the {received} bytes read")]
    SizeMismatch { declared: u32, received: usize },

    /// An I/O error occurred while reading or writing packets.
    #[error("packet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a packet was received.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
