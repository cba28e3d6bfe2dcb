//! Source RCON packet framing.
//!
//! Every packet on the wire is laid out as:
//! - A 4-byte little-endian size (bytes that follow the size field)
//! - A 4-byte little-endian request id
//! - A 4-byte little-endian packet type
//! - The body bytes, then two `0x00` terminator bytes
//!
//! One read is treated as one complete packet. Responses split across reads
//! or spanning several packets are not reassembled.

pub mod codec;
pub mod error;
pub mod packet;
pub mod reader;
pub mod writer;

pub use codec::{decode_u32_le, encode_u32_le, is_big_endian};
pub use error::{FrameError, Result};
pub use packet::{
    Packet, PacketType, HEADER_SIZE, MAX_BODY_SIZE, MAX_PACKET_SIZE, MIN_PACKET_SIZE,
    SIZE_OVERHEAD, TERMINATOR_SIZE,
};
pub use reader::PacketReader;
pub use writer::PacketWriter;
