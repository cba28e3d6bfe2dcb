//! Source RCON protocol client.
//!
//! rconprims talks the length-prefixed binary RCON protocol game servers
//! expose over TCP: authenticate with a password, then run console commands.
//!
//! # Crate Structure
//!
//! - [`transport`]: TCP transport (IPv4 resolution, bounded readability waits)
//! - [`frame`]: Packet codec, little-endian integers, single-read packet reader
//! - [`client`]: Connection state machine and request ids (behind `client` feature)
//!
//! # Features
//!
//! - `client` (default): the [`client`] module.
//! - `cli`: the `rcon` binary, e.g. `cargo run --features cli -- 127.0.0.1:27015 status`.

/// Re-export transport types.
pub mod transport {
    pub use rconprims_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use rconprims_frame::*;
}

/// Re-export client types (requires `client` feature).
#[cfg(feature = "client")]
pub mod client {
    pub use rconprims_client::*;
}
