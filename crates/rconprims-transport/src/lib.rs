//! TCP transport for Source RCON clients.
//!
//! Provides the socket-level pieces the protocol engine is built on:
//! - IPv4-only hostname resolution that takes the first candidate address
//! - Blocking TCP connect with an optional bound
//! - [`RconStream`], a `Read + Write` stream with a bounded readability wait
//!
//! This is the lowest layer of rconprims. Everything else builds on top of
//! the [`RconStream`] type provided here.

pub mod error;
pub mod poll;
pub mod stream;
pub mod tcp;

pub use error::{Result, TransportError};
pub use poll::Readiness;
pub use stream::RconStream;
pub use tcp::{connect, resolve_ipv4};
