//! Little-endian `u32` conversion independent of host byte order.

use std::sync::OnceLock;

/// Whether the host stores multi-byte integers most significant byte first.
///
/// Checked once by looking at the first in-memory byte of `0x0102u16`, then
/// cached for the lifetime of the process.
pub fn is_big_endian() -> bool {
    static BIG_ENDIAN: OnceLock<bool> = OnceLock::new();
    *BIG_ENDIAN.get_or_init(|| 0x0102u16.to_ne_bytes()[0] == 0x01)
}

/// Encode `value` as 4 little-endian bytes.
pub fn encode_u32_le(value: u32) -> [u8; 4] {
    if is_big_endian() {
        value.swap_bytes().to_ne_bytes()
    } else {
        value.to_ne_bytes()
    }
}

/// Decode 4 little-endian bytes into a `u32`.
pub fn decode_u32_le(bytes: [u8; 4]) -> u32 {
    let native = u32::from_ne_bytes(bytes);
    if is_big_endian() {
        native.swap_bytes()
    } else {
        native
    }
}
