//! Field-level modifiers for building DHCPv4 messages.
//!
//! A message is assembled by seeding a [`MessageBuilder`] with BOOTP request
//! defaults and then applying an ordered list of [`Modifier`]s. Later
//! modifiers overwrite whatever earlier ones set, so callers can append their
//! own modifiers after a set of defaults to override individual fields.

use crate::error::BuildError;
use bytes::Bytes;
use dhcproto::{v4, Encodable as _, Encoder};
use dhcproto::error::EncodeError;
use std::net::Ipv4Addr;

/// Length of the fixed `chaddr` field in a BOOTP header.
pub const CHADDR_LEN: usize = 16;

/// A single field transformation applied to a message under construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// Sets option 53.
    MessageType(v4::MessageType),
    /// Sets `ciaddr`.
    ClientIp(Ipv4Addr),
    /// Sets `chaddr` (and `hlen`).
    HwAddr(Bytes),
    /// Sets or clears the broadcast bit in `flags`.
    Broadcast(bool),
    /// Inserts an option, replacing any option with the same code.
    Option(v4::DhcpOption),
    /// Sets `xid`.
    TransactionId(u32),
}

/// Returns `defaults` followed by `modifiers`, so that the caller supplied
/// modifiers are applied last and win over the defaults.
pub fn prepend_modifiers<I>(modifiers: I, defaults: Vec<Modifier>) -> Vec<Modifier>
where
    I: IntoIterator<Item = Modifier>,
{
    let mut all = defaults;
    all.extend(modifiers);
    all
}

/// Accumulates message fields before they are assembled into a `v4::Message`.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    xid: u32,
    ciaddr: Ipv4Addr,
    chaddr: Bytes,
    broadcast: bool,
    opts: v4::DhcpOptions,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBuilder {
    /// Starts from an empty BOOTREQUEST with a random transaction id.
    pub fn new() -> Self {
        Self {
            xid: rand::random(),
            ciaddr: Ipv4Addr::UNSPECIFIED,
            chaddr: Bytes::new(),
            broadcast: false,
            opts: v4::DhcpOptions::new(),
        }
    }

    /// Applies one modifier on top of the fields set so far.
    pub fn apply(&mut self, modifier: Modifier) -> &mut Self {
        match modifier {
            Modifier::MessageType(msg_type) => {
                self.opts.insert(v4::DhcpOption::MessageType(msg_type));
            }
            Modifier::ClientIp(ip) => self.ciaddr = ip,
            Modifier::HwAddr(addr) => self.chaddr = addr,
            Modifier::Broadcast(broadcast) => self.broadcast = broadcast,
            Modifier::Option(opt) => {
                self.opts.insert(opt);
            }
            Modifier::TransactionId(xid) => self.xid = xid,
        }
        self
    }

    /// Assembles the final message, rejecting field sets that cannot be
    /// represented on the wire.
    pub fn build(self) -> Result<v4::Message, BuildError> {
        if self.chaddr.len() > CHADDR_LEN {
            return Err(BuildError::HardwareAddressTooLong(self.chaddr.len()));
        }
        if self.opts.get(v4::OptionCode::MessageType).is_none() {
            return Err(BuildError::MissingMessageType);
        }

        let flags = if self.broadcast {
            v4::Flags::default().set_broadcast()
        } else {
            v4::Flags::default()
        };

        let mut msg = v4::Message::default();
        msg.set_opcode(v4::Opcode::BootRequest)
            .set_htype(v4::HType::Eth)
            .set_chaddr(&self.chaddr)
            .set_hops(0)
            .set_xid(self.xid)
            .set_secs(0)
            .set_flags(flags)
            .set_ciaddr(self.ciaddr)
            .set_opts(self.opts);
        Ok(msg)
    }
}

/// Builds a message by applying `modifiers`, in order, to a fresh
/// [`MessageBuilder`].
pub fn new_message<I>(modifiers: I) -> Result<v4::Message, BuildError>
where
    I: IntoIterator<Item = Modifier>,
{
    let mut builder = MessageBuilder::new();
    for modifier in modifiers {
        builder.apply(modifier);
    }
    builder.build()
}

/// Serializes a message to its wire format.
pub fn to_bytes(msg: &v4::Message) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer);
    msg.encode(&mut encoder)?;
    Ok(buffer)
}

/// Reads option 54 off a message.
pub fn server_identifier(msg: &v4::Message) -> Option<Ipv4Addr> {
    match msg.opts().get(v4::OptionCode::ServerIdentifier) {
        Some(v4::DhcpOption::ServerIdentifier(ip)) => Some(*ip),
        _ => None,
    }
}

/// Reads option 53 off a message.
pub fn message_type(msg: &v4::Message) -> Option<v4::MessageType> {
    match msg.opts().get(v4::OptionCode::MessageType) {
        Some(v4::DhcpOption::MessageType(msg_type)) => Some(*msg_type),
        _ => None,
    }
}
