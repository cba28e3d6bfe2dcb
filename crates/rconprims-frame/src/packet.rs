use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::codec::{decode_u32_le, encode_u32_le};
use crate::error::{FrameError, Result};

/// Bytes before the body: size (4) + id (4) + type (4).
pub const HEADER_SIZE: usize = 12;

/// Two `0x00` bytes terminate every packet.
pub const TERMINATOR_SIZE: usize = 2;

/// Smallest valid packet: header plus terminators, empty body.
pub const MIN_PACKET_SIZE: usize = HEADER_SIZE + TERMINATOR_SIZE;

/// Difference between the size field and the body length: id + type + terminators.
pub const SIZE_OVERHEAD: u32 = 10;

/// Largest packet a server sends: 4 size bytes + 4096 declared bytes.
pub const MAX_PACKET_SIZE: usize = 4100;

/// Largest body that fits in [`MAX_PACKET_SIZE`].
pub const MAX_BODY_SIZE: usize = MAX_PACKET_SIZE - MIN_PACKET_SIZE;

/// Logical packet types and their wire codes.
///
/// `AuthResponse` and `ExecCommand` share code 2; which one a packet is
/// depends on the direction it travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Auth,
    AuthResponse,
    ExecCommand,
    ResponseValue,
}

impl PacketType {
    /// The wire code for this type.
    pub const fn code(self) -> u32 {
        match self {
            PacketType::Auth => 3,
            PacketType::AuthResponse | PacketType::ExecCommand => 2,
            PacketType::ResponseValue => 0,
        }
    }

    /// Protocol name of this type.
    pub const fn name(self) -> &'static str {
        match self {
            PacketType::Auth => "SERVERDATA_AUTH",
            PacketType::AuthResponse => "SERVERDATA_AUTH_RESPONSE",
            PacketType::ExecCommand => "SERVERDATA_EXECCOMMAND",
            PacketType::ResponseValue => "SERVERDATA_RESPONSE_VALUE",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// One RCON protocol message.
///
/// The size field is derived from the body on demand, so it always equals
/// `body.len() + 10`.
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    id: u32,
    kind: u32,
    body: Bytes,
}

impl Packet {
    /// Create a packet with an empty body.
    pub fn new(id: u32, kind: PacketType) -> Self {
        Self {
            id,
            kind: kind.code(),
            body: Bytes::new(),
        }
    }

    /// Create a packet from a raw wire type code.
    pub fn from_raw(id: u32, type_code: u32, body: impl Into<Bytes>) -> Self {
        Self {
            id,
            kind: type_code,
            body: body.into(),
        }
    }

    /// Builder-style body setter.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.set_body(body);
        self
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Request correlation id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Raw wire type code.
    pub fn type_code(&self) -> u32 {
        self.kind
    }

    /// Whether this packet carries the wire code of `kind`.
    pub fn is(&self, kind: PacketType) -> bool {
        self.kind == kind.code()
    }

    /// Payload bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Value of the size field: body length plus [`SIZE_OVERHEAD`].
    ///
    /// Saturates at `u32::MAX` for bodies too large to describe.
    pub fn size(&self) -> u32 {
        u32::try_from(self.body.len())
            .unwrap_or(u32::MAX)
            .saturating_add(SIZE_OVERHEAD)
    }

    /// The total wire size of this packet, including the size field itself.
    pub fn wire_size(&self) -> usize {
        MIN_PACKET_SIZE + self.body.len()
    }

    /// Encode this packet into the wire format.
    ///
    /// Wire format:
    /// ```text
    /// ┌───────────┬───────────┬───────────┬──────────────┬───────────┐
    /// │ Size      │ Id        │ Type      │ Body         │ 0x00 0x00 │
    /// │ (4B LE)   │ (4B LE)   │ (4B LE)   │ (Size-10 B)  │           │
    /// └───────────┴───────────┴───────────┴──────────────┴───────────┘
    /// ```
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.wire_size());
        dst.put_slice(&encode_u32_le(self.size()));
        dst.put_slice(&encode_u32_le(self.id));
        dst.put_slice(&encode_u32_le(self.kind));
        dst.put_slice(&self.body);
        dst.put_bytes(0, TERMINATOR_SIZE);
    }

    /// Encode this packet into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Decode a packet from exactly the bytes of one read.
    ///
    /// The body is everything between the header and the last two bytes. A
    /// size field that disagrees with `src.len()` is tolerated and logged.
    pub fn decode(src: &[u8]) -> Result<Self> {
        let (declared, packet) = Self::decode_parts(src)?;
        if declared as usize != src.len() - 4 {
            debug!(
                declared,
                received = src.len(),
                "packet size field does not match bytes received"
            );
        }
        Ok(packet)
    }

    /// Decode a packet, rejecting a size field that disagrees with `src.len()`.
    ///
    /// A mismatch means the read ended inside a packet or ran into the next
    /// one, so whatever follows on the stream no longer starts on a packet
    /// boundary.
    pub fn decode_exact(src: &[u8]) -> Result<Self> {
        let (declared, packet) = Self::decode_parts(src)?;
        if declared as usize != src.len() - 4 {
            return Err(FrameError::SizeMismatch {
                declared,
                received: src.len(),
            });
        }
        Ok(packet)
    }

    fn decode_parts(src: &[u8]) -> Result<(u32, Self)> {
        if src.len() < MIN_PACKET_SIZE {
            return Err(FrameError::Truncated {
                len: src.len(),
                min: MIN_PACKET_SIZE,
            });
        }

        let declared = read_u32(src, 0);
        let id = read_u32(src, 4);
        let kind = read_u32(src, 8);
        let body = Bytes::copy_from_slice(&src[HEADER_SIZE..src.len() - TERMINATOR_SIZE]);
        Ok((declared, Self { id, kind, body }))
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Packet");
        dbg.field("size", &self.size())
            .field("id", &self.id)
            .field("type", &self.kind);
        if self.kind == PacketType::Auth.code() {
            dbg.field("body", &format_args!("<redacted:{} bytes>", self.body.len()));
        } else {
            dbg.field("body", &String::from_utf8_lossy(&self.body));
        }
        dbg.finish()
    }
}

fn read_u32(src: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&src[offset..offset + 4]);
    decode_u32_le(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_tracks_body() {
        let mut packet = Packet::new(0, PacketType::ExecCommand);
        assert_eq!(packet.size(), 10);

        packet.set_body("abcd");
        assert_eq!(packet.size(), 14);

        packet.set_body("");
        assert_eq!(packet.size(), 10);
    }

    #[test]
    fn type_codes() {
        assert_eq!(PacketType::Auth.code(), 3);
        assert_eq!(PacketType::AuthResponse.code(), 2);
        assert_eq!(PacketType::ExecCommand.code(), 2);
        assert_eq!(PacketType::ResponseValue.code(), 0);
    }

    #[test]
    fn encode_empty_body() {
        let packet = Packet::from_raw(0, 0, "");
        let expected: &[u8] = &[10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(packet.to_bytes().as_ref(), expected);
        assert_eq!(packet.wire_size(), 14);
    }

    #[test]
    fn encode_with_body() {
        let packet = Packet::from_raw(0, 0, "abcd");
        let expected: &[u8] = &[
            14, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'a', b'b', b'c', b'd', 0, 0,
        ];
        assert_eq!(packet.to_bytes().as_ref(), expected);
        assert_eq!(packet.to_bytes().len(), packet.size() as usize + 4);
    }

    #[test]
    fn encode_auth_packet_fields() {
        let packet = Packet::new(0x0102_0304, PacketType::Auth).with_body("pw");
        let bytes = packet.to_bytes();
        assert_eq!(&bytes[0..4], &[12, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[8..12], &[3, 0, 0, 0]);
        assert_eq!(&bytes[12..14], b"pw");
        assert_eq!(&bytes[14..], &[0, 0]);
    }

    #[test]
    fn decode_reencodes_identically() {
        let wires: [&[u8]; 2] = [
            &[14, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[
                14, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'a', b'b', b'c', b'd', 0, 0,
            ],
        ];
        let decoded = Packet::decode(wires[1]).unwrap();
        assert_eq!(decoded.to_bytes().as_ref(), wires[1]);

        // The size field of the first vector lies; decoding trusts the read length.
        let decoded = Packet::decode(wires[0]).unwrap();
        assert!(decoded.body().is_empty());
        assert_eq!(decoded.size(), 10);
    }

    #[test]
    fn roundtrip_preserves_fields() {
        let bodies: [&[u8]; 3] = [b"", b"status", &[0xFF, 0x00, 0x7F]];
        for body in bodies {
            let packet = Packet::new(7, PacketType::ResponseValue).with_body(body.to_vec());
            let decoded = Packet::decode(&packet.to_bytes()).unwrap();
            assert_eq!(decoded, packet);
        }
    }

    #[test]
    fn decode_rejected_auth_reply() {
        let wire = [10, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 2, 0, 0, 0, 0, 0];
        let packet = Packet::decode(&wire).unwrap();
        assert_eq!(packet.id(), u32::MAX);
        assert!(packet.is(PacketType::AuthResponse));
    }

    #[test]
    fn decode_truncated_rejected() {
        for len in [0, 4, 12, 13] {
            let wire = vec![0u8; len];
            let err = Packet::decode(&wire).unwrap_err();
            assert!(matches!(err, FrameError::Truncated { len: l, min: 14 } if l == len));
        }
    }

    #[test]
    fn decode_exact_accepts_consistent_size() {
        let wire = Packet::from_raw(4, 0, "abcdef").to_bytes();
        let packet = Packet::decode_exact(&wire).unwrap();
        assert_eq!(packet.body().as_ref(), b"abcdef");
    }

    #[test]
    fn decode_exact_rejects_short_read() {
        let wire = Packet::from_raw(4, 0, "abcdef").to_bytes();
        let err = Packet::decode_exact(&wire[..14]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::SizeMismatch {
                declared: 16,
                received: 14
            }
        ));

        // The tolerant decoder still takes the body from the read length.
        assert!(Packet::decode(&wire[..14]).unwrap().body().is_empty());
    }

    #[test]
    fn decode_exact_rejects_coalesced_packets() {
        let mut wire = Packet::from_raw(1, 0, "one").to_bytes().to_vec();
        wire.extend_from_slice(&Packet::from_raw(2, 0, "two").to_bytes());
        let err = Packet::decode_exact(&wire).unwrap_err();
        assert!(matches!(
            err,
            FrameError::SizeMismatch {
                declared: 13,
                received: 34
            }
        ));
    }

    #[test]
    fn debug_redacts_auth_body() {
        let packet = Packet::new(1, PacketType::Auth).with_body("hunter2");
        let rendered = format!("{packet:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("redacted:7 bytes"));

        let reply = Packet::new(1, PacketType::ResponseValue).with_body("players: 0");
        assert!(format!("{reply:?}").contains("players: 0"));
    }

    #[test]
    fn max_sizes_consistent() {
        let packet = Packet::new(0, PacketType::ResponseValue).with_body(vec![b'x'; MAX_BODY_SIZE]);
        assert_eq!(packet.wire_size(), MAX_PACKET_SIZE);
        assert_eq!(packet.size(), 4096);
    }
}
