use std::borrow::Cow;
use std::io::Write;

use bytes::Bytes;
use rconprims_frame::Packet;

/// The reply to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    id: u32,
    body: Bytes,
}

impl CommandResponse {
    pub(crate) fn new(id: u32, body: Bytes) -> Self {
        Self { id, body }
    }

    /// Wrap a reply packet that has already been validated.
    pub fn from_packet(packet: &Packet) -> Self {
        Self::new(packet.id(), packet.body().clone())
    }

    /// Request id the reply was correlated with.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Raw reply bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Reply decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Write the reply followed by a newline unless it already ends with one.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(&self.body)?;
        if !self.body.ends_with(b"\n") {
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}
