use std::time::Duration;

use crate::address::DEFAULT_PORT;

/// Default bound on every wait for a reply: 5 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Configuration for a [`Connection`](crate::Connection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Port used when the host string does not name one. Default: 25575.
    pub default_port: u16,
    /// Reply timeout used by the `*_default` operations. Default: 5 s.
    pub timeout: Duration,
    /// Bound on the TCP connect. Default: none (OS default).
    pub connect_timeout: Option<Duration>,
    /// Write timeout applied to the socket. Default: none.
    pub write_timeout: Option<Duration>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            write_timeout: None,
        }
    }
}
