use std::io::{ErrorKind, Read};
use std::time::Duration;

use rconprims_transport::{RconStream, Readiness};
use tracing::trace;

use crate::error::{FrameError, Result};
use crate::packet::{Packet, MAX_PACKET_SIZE};

/// Reads packets from any `Read` stream.
///
/// Each call performs a single read of up to [`MAX_PACKET_SIZE`] bytes and
/// decodes whatever arrived as one packet. Short reads are not topped up and
/// multi-packet responses are not reassembled; a read whose length disagrees
/// with the size field fails with [`FrameError::SizeMismatch`].
pub struct PacketReader<T> {
    inner: T,
    buf: Box<[u8]>,
}

impl<T: Read> PacketReader<T> {
    /// Create a new packet reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: vec![0u8; MAX_PACKET_SIZE].into_boxed_slice(),
        }
    }

    /// Read the next packet (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_packet(&mut self) -> Result<Packet> {
        loop {
            let read = match self.inner.read(&mut self.buf) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            trace!(len = read, "read packet bytes");
            return Packet::decode_exact(&self.buf[..read]);
        }
    }
}

impl PacketReader<RconStream> {
    /// Wait up to `timeout` for data, then read one packet.
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    pub fn read_packet_within(&mut self, timeout: Duration) -> Result<Option<Packet>> {
        match self.inner.wait_readable(timeout)? {
            Readiness::Ready => self.read_packet().map(Some),
            Readiness::TimedOut => Ok(None),
        }
    }
}
