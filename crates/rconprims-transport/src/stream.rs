use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::error::Result;
use crate::poll::Readiness;

/// A connected RCON stream. Implements `Read` and `Write`.
///
/// This is the fundamental I/O type returned by [`crate::connect`]. It wraps a
/// TCP stream and adds a bounded wait for readability.
pub struct RconStream {
    inner: TcpStream,
}

impl Read for RconStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for RconStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl RconStream {
    /// Wrap an already connected TCP stream.
    pub fn from_tcp(stream: TcpStream) -> Self {
        Self { inner: stream }
    }

    /// Block until the stream is readable or `timeout` elapses.
    ///
    /// EOF and socket errors count as readable; the next read reports them.
    #[cfg(unix)]
    pub fn wait_readable(&self, timeout: Duration) -> std::io::Result<Readiness> {
        use std::os::fd::AsRawFd;

        crate::poll::wait_fd_readable(self.inner.as_raw_fd(), timeout)
    }

    /// Block until the stream is readable or `timeout` elapses.
    #[cfg(not(unix))]
    pub fn wait_readable(&self, timeout: Duration) -> std::io::Result<Readiness> {
        // A zero read timeout means "block forever" to the OS.
        let timeout = timeout.max(Duration::from_millis(1));
        self.inner.set_read_timeout(Some(timeout))?;
        let mut probe = [0u8; 1];
        let result = match self.inner.peek(&mut probe) {
            Ok(_) => Ok(Readiness::Ready),
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Ok(Readiness::TimedOut)
            }
            Err(_) => Ok(Readiness::Ready),
        };
        self.inner.set_read_timeout(None)?;
        result
    }

    /// Set write timeout on the underlying stream.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.inner.set_write_timeout(timeout).map_err(Into::into)
    }

    /// Try to clone this stream (creates a new file descriptor).
    pub fn try_clone(&self) -> Result<Self> {
        let cloned = self.inner.try_clone()?;
        Ok(Self::from_tcp(cloned))
    }

    /// Shut down both halves of the connection.
    ///
    /// Affects every clone of this stream.
    pub fn shutdown(&self) -> Result<()> {
        match self.inner.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl std::fmt::Debug for RconStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("RconStream");
        dbg.field("type", &"tcp");
        if let Ok(addr) = self.inner.peer_addr() {
            dbg.field("peer", &addr);
        }
        dbg.finish()
    }
}
