//! DHCPRELEASE construction (RFC 2131, section 4.4.4).

use super::modifier::{new_message, prepend_modifiers, server_identifier, Modifier, CHADDR_LEN};
use crate::{error::BuildError, lease::Lease};
use bytes::Bytes;
use dhcproto::v4;

/// Creates a DHCPRELEASE message from `lease`.
///
/// Without modifiers the message is built entirely from the lease's ACK:
/// - message type is Release
/// - `ciaddr` is the ACK's `yiaddr`
/// - `chaddr` is the ACK's `chaddr`
/// - the broadcast flag is cleared
/// - the server identifier option is copied from the ACK
///
/// `modifiers` are applied after these defaults, in order, and may override
/// any of them.
pub fn build_release_message<I>(lease: &Lease, modifiers: I) -> Result<v4::Message, BuildError>
where
    I: IntoIterator<Item = Modifier>,
{
    let ack = lease.ack();
    if usize::from(ack.hlen()) > CHADDR_LEN {
        return Err(BuildError::HardwareAddressTooLong(ack.hlen().into()));
    }

    let mut defaults = vec![
        Modifier::MessageType(v4::MessageType::Release),
        Modifier::ClientIp(ack.yiaddr()),
        Modifier::HwAddr(Bytes::copy_from_slice(ack.chaddr())),
        Modifier::Broadcast(false),
    ];
    if let Some(server_ip) = server_identifier(ack) {
        defaults.push(Modifier::Option(v4::DhcpOption::ServerIdentifier(server_ip)));
    }

    new_message(prepend_modifiers(modifiers, defaults))
}
