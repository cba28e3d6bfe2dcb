use std::io::BufRead;
use std::time::Duration;

use rconprims::transport::Readiness;
use tracing::warn;

/// Read the password from the first line of stdin, waiting at most `timeout`.
///
/// Yields an empty string when nothing arrives in time or stdin fails.
pub fn read_password(timeout: Duration) -> String {
    match wait_for_stdin(timeout) {
        Ok(Readiness::Ready) => {}
        Ok(Readiness::TimedOut) => {
            warn!(?timeout, "timed out waiting for password");
            return String::new();
        }
        Err(err) => {
            warn!(error = %err, "error waiting for password");
            return String::new();
        }
    }

    first_line(std::io::stdin().lock()).unwrap_or_else(|err| {
        warn!(error = %err, "error reading password");
        String::new()
    })
}

#[cfg(unix)]
fn wait_for_stdin(timeout: Duration) -> std::io::Result<Readiness> {
    use std::os::fd::AsRawFd;

    rconprims::transport::poll::wait_fd_readable(std::io::stdin().as_raw_fd(), timeout)
}

#[cfg(not(unix))]
fn wait_for_stdin(_timeout: Duration) -> std::io::Result<Readiness> {
    Ok(Readiness::Ready)
}

/// First line of `reader` without its line terminator.
pub fn first_line<R: BufRead>(mut reader: R) -> std::io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let len = line.trim_end_matches(|c| c == '\r' || c == '\n').len();
    line.truncate(len);
    Ok(line)
}
