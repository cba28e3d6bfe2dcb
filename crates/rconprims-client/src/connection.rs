use std::time::Duration;

use bytes::Bytes;
use rconprims_frame::{FrameError, Packet, PacketReader, PacketType, PacketWriter};
use rconprims_transport::RconStream;
use tracing::{debug, info, warn};

use crate::address::split_host_with_default;
use crate::config::ConnectionConfig;
use crate::error::{Mismatch, RconError, Result};
use crate::ids::IdAllocator;
use crate::response::CommandResponse;

/// Id a server puts in its auth reply when it refuses the password.
pub const AUTH_REJECTED_ID: u32 = u32::MAX;

/// Both halves of an established socket.
struct Link {
    reader: PacketReader<RconStream>,
    writer: PacketWriter<RconStream>,
}

/// A client connection to one RCON server.
///
/// The socket is opened lazily by the first [`send`](Self::send) or
/// [`recv`](Self::recv) and kept for the life of the connection. A send or
/// receive that fails, times out or reads a broken packet drops the socket,
/// so the next call starts from a fresh connect instead of reusing it. A
/// reply whose length disagrees with its size field counts as broken.
/// Nothing is retried within a call.
///
/// Every operation takes `&mut self`, so only one request is ever in flight.
pub struct Connection {
    hostname: String,
    port: u16,
    link: Option<Link>,
    ids: IdAllocator,
    config: ConnectionConfig,
}

impl Connection {
    /// Create a connection to `host[:port]` with default configuration.
    ///
    /// No network activity happens until the first exchange.
    pub fn new(host_str: &str) -> Self {
        Self::with_config(host_str, ConnectionConfig::default())
    }

    /// Create a connection with explicit configuration.
    pub fn with_config(host_str: &str, config: ConnectionConfig) -> Self {
        let (hostname, port) = split_host_with_default(host_str, config.default_port);
        Self {
            hostname,
            port,
            link: None,
            ids: IdAllocator::new(),
            config,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Whether a socket is currently established.
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Open the socket if it is not open yet.
    ///
    /// On failure the connection stays disconnected and can be retried.
    pub fn connect(&mut self) -> Result<()> {
        self.link().map(|_| ())
    }

    /// Close the socket. The next exchange reconnects.
    pub fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            let _ = link.writer.get_ref().shutdown();
            debug!(host = %self.hostname, port = self.port, "disconnected");
        }
    }

    /// Serialize `packet` and write all of it.
    pub fn send(&mut self, packet: &Packet) -> Result<()> {
        let result = self.link()?.writer.write_packet(packet);
        match result {
            Ok(()) => {
                debug!(
                    id = packet.id(),
                    packet_type = packet.type_code(),
                    len = packet.body().len(),
                    "sent packet"
                );
                Ok(())
            }
            Err(err) => {
                self.invalidate("send failed");
                Err(err.into())
            }
        }
    }

    /// Wait up to `timeout` for a reply and decode it from a single read.
    pub fn recv(&mut self, timeout: Duration) -> Result<Packet> {
        let result = self.link()?.reader.read_packet_within(timeout);
        match result {
            Ok(Some(packet)) => {
                debug!(
                    id = packet.id(),
                    packet_type = packet.type_code(),
                    len = packet.body().len(),
                    "received packet"
                );
                Ok(packet)
            }
            Ok(None) => {
                // A late reply would otherwise be read as the answer to the next request.
                self.invalidate("timed out waiting for packet");
                Err(RconError::Timeout(timeout))
            }
            Err(FrameError::SizeMismatch { declared, received }) => {
                // The rest of the packet, or the start of the next, is still queued.
                warn!(
                    host = %self.hostname,
                    port = self.port,
                    declared,
                    received,
                    "reply does not match its size field"
                );
                self.invalidate("packet size mismatch");
                Err(FrameError::SizeMismatch { declared, received }.into())
            }
            Err(err) => {
                self.invalidate("receive failed");
                Err(err.into())
            }
        }
    }

    /// Authenticate with `password`, waiting up to `timeout` for the reply.
    pub fn authenticate(&mut self, password: &str, timeout: Duration) -> Result<()> {
        let id = self.ids.generate();
        let result = self.authenticate_as(id, password, timeout);
        self.ids.release(id);
        result
    }

    /// [`authenticate`](Self::authenticate) with the configured timeout.
    pub fn authenticate_default(&mut self, password: &str) -> Result<()> {
        self.authenticate(password, self.config.timeout)
    }

    /// Run `command`, waiting up to `timeout` for the reply.
    ///
    /// Only the first reply packet is returned; output the server splits
    /// across several packets is truncated.
    pub fn run_command(&mut self, command: &str, timeout: Duration) -> Result<CommandResponse> {
        let id = self.ids.generate();
        let result = self.run_command_as(id, command, timeout);
        self.ids.release(id);
        result
    }

    /// [`run_command`](Self::run_command) with the configured timeout.
    pub fn run_command_default(&mut self, command: &str) -> Result<CommandResponse> {
        self.run_command(command, self.config.timeout)
    }

    fn authenticate_as(&mut self, id: u32, password: &str, timeout: Duration) -> Result<()> {
        let request =
            Packet::new(id, PacketType::Auth).with_body(Bytes::copy_from_slice(password.as_bytes()));
        let reply = self.exchange(&request, timeout)?;

        expect_type(&reply, PacketType::AuthResponse)?;
        if reply.id() == AUTH_REJECTED_ID && id != AUTH_REJECTED_ID {
            warn!(host = %self.hostname, port = self.port, "authentication failed");
            return Err(Mismatch::AuthRejected.into());
        }
        expect_id(&reply, id)?;

        info!(host = %self.hostname, port = self.port, "authenticated");
        Ok(())
    }

    fn run_command_as(
        &mut self,
        id: u32,
        command: &str,
        timeout: Duration,
    ) -> Result<CommandResponse> {
        let request = Packet::new(id, PacketType::ExecCommand)
            .with_body(Bytes::copy_from_slice(command.as_bytes()));
        let reply = self.exchange(&request, timeout)?;

        expect_type(&reply, PacketType::ResponseValue)?;
        expect_id(&reply, id)?;

        Ok(CommandResponse::from_packet(&reply))
    }

    fn exchange(&mut self, request: &Packet, timeout: Duration) -> Result<Packet> {
        self.send(request)?;
        self.recv(timeout)
    }

    /// The established link, connecting first if there is none.
    fn link(&mut self) -> Result<&mut Link> {
        let link = match self.link.take() {
            Some(link) => link,
            None => self.open_link()?,
        };
        Ok(self.link.insert(link))
    }

    fn open_link(&self) -> Result<Link> {
        let stream =
            rconprims_transport::connect(&self.hostname, self.port, self.config.connect_timeout)?;
        stream.set_write_timeout(self.config.write_timeout)?;
        let reader_stream = stream.try_clone()?;

        info!(host = %self.hostname, port = self.port, "connected to RCON server");
        Ok(Link {
            reader: PacketReader::new(reader_stream),
            writer: PacketWriter::new(stream),
        })
    }

    fn invalidate(&mut self, reason: &str) {
        if self.link.take().is_some() {
            debug!(host = %self.hostname, port = self.port, reason, "dropping socket");
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("connected", &self.is_connected())
            .field("outstanding_ids", &self.ids.outstanding())
            .field("config", &self.config)
            .finish()
    }
}

fn expect_type(reply: &Packet, expected: PacketType) -> Result<()> {
    if reply.is(expected) {
        Ok(())
    } else {
        Err(Mismatch::UnexpectedType {
            expected,
            actual: reply.type_code(),
        }
        .into())
    }
}

fn expect_id(reply: &Packet, expected: u32) -> Result<()> {
    if reply.id() == expected {
        Ok(())
    } else {
        Err(Mismatch::UnexpectedId {
            expected,
            actual: reply.id(),
        }
        .into())
    }
}
