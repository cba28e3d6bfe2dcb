//! Bounded readability waits.
//!
//! Blocks the calling thread until a descriptor has data to read or the
//! timeout expires. Never busy-polls.

use std::time::Duration;
#[cfg(unix)]
use std::time::Instant;

/// Outcome of a bounded readability wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Data (or EOF) is available to read without blocking.
    Ready,
    /// The timeout elapsed with nothing to read.
    TimedOut,
}

/// Convert a timeout into the millisecond argument `poll(2)` expects.
pub(crate) fn timeout_millis(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX)
}

/// Wait up to `timeout` for `fd` to become readable.
///
/// `EINTR` restarts the wait with whatever time is left.
#[cfg(unix)]
pub fn wait_fd_readable(
    fd: std::os::fd::RawFd,
    timeout: Duration,
) -> std::io::Result<Readiness> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };

        // SAFETY: `pfd` is a valid, writable pollfd and we pass a count of 1.
        let rc = unsafe { libc::poll(&mut pfd, 1, timeout_millis(remaining)) };

        if rc > 0 {
            // POLLHUP/POLLERR also count: the following read reports EOF or the error.
            return Ok(Readiness::Ready);
        }
        if rc == 0 {
            return Ok(Readiness::TimedOut);
        }

        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::Interrupted {
            continue;
        }
        return Err(err);
    }
}
