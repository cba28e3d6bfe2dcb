//! Source RCON client.
//!
//! This is the "just works" layer. Build a [`Connection`] from a
//! `host[:port]` string, authenticate, then run commands. The socket is
//! opened lazily on first use and every wait is bounded by a timeout.
//!
//! ```no_run
//! use std::time::Duration;
//! use rconprims_client::Connection;
//!
//! let mut rcon = Connection::new("127.0.0.1:25575");
//! rcon.authenticate("password", Duration::from_secs(5))?;
//! let reply = rcon.run_command("list", Duration::from_secs(5))?;
//! reply.write_to(&mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod address;
pub mod config;
pub mod connection;
pub mod error;
pub mod ids;
pub mod response;

pub use address::{split_host, split_host_with_default, DEFAULT_HOST, DEFAULT_PORT};
pub use config::{ConnectionConfig, DEFAULT_TIMEOUT};
pub use connection::{Connection, AUTH_REJECTED_ID};
pub use error::{ErrorKind, Mismatch, RconError, Result};
pub use ids::IdAllocator;
pub use response::CommandResponse;
