use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::warn;

use crate::error::{FrameError, Result};
use crate::packet::{Packet, MAX_BODY_SIZE, MAX_PACKET_SIZE};

/// Writes complete packets to any `Write` stream.
pub struct PacketWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> PacketWriter<T> {
    /// Create a new packet writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_PACKET_SIZE),
        }
    }

    /// Encode and write a complete packet (blocking).
    ///
    /// Oversized bodies are sent as-is; the server decides what to do with them.
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        if packet.body().len() > MAX_BODY_SIZE {
            warn!(
                len = packet.body().len(),
                max = MAX_BODY_SIZE,
                "packet body exceeds what one RCON packet can carry"
            );
        }

        self.buf.clear();
        packet.encode(&mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }
}
