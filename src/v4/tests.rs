use super::*;
use crate::{error::BuildError, lease::Lease, v4::modifier::{server_identifier, to_bytes}};
use bytes::Bytes;
use dhcproto::{v4, Decodable, Decoder};
use std::net::Ipv4Addr;

const CLIENT_MAC: [u8; 6] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
const YIADDR: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 5);
const SERVER_IP: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

fn test_lease() -> Lease {
    let mut offer = v4::Message::default();
    offer
        .set_opcode(v4::Opcode::BootReply)
        .set_chaddr(&CLIENT_MAC)
        .set_yiaddr(YIADDR);
    offer
        .opts_mut()
        .insert(v4::DhcpOption::MessageType(v4::MessageType::Offer));

    let mut ack = v4::Message::default();
    ack.set_opcode(v4::Opcode::BootReply)
        .set_chaddr(&CLIENT_MAC)
        .set_yiaddr(YIADDR)
        .set_flags(v4::Flags::default().set_broadcast());
    ack.opts_mut()
        .insert(v4::DhcpOption::MessageType(v4::MessageType::Ack));
    ack.opts_mut()
        .insert(v4::DhcpOption::ServerIdentifier(SERVER_IP));
    ack.opts_mut()
        .insert(v4::DhcpOption::AddressLeaseTime(86400));

    Lease::new(offer, ack)
}

#[test]
fn test_build_release_defaults() {
    let lease = test_lease();

    let msg = build_release_message(&lease, []).unwrap();

    assert_eq!(msg.opcode(), v4::Opcode::BootRequest);
    assert!(matches!(
        msg.opts().get(v4::OptionCode::MessageType),
        Some(v4::DhcpOption::MessageType(v4::MessageType::Release))
    ));
    assert_eq!(msg.ciaddr(), YIADDR);
    assert_eq!(msg.yiaddr(), Ipv4Addr::UNSPECIFIED);
    assert_eq!(msg.chaddr(), &CLIENT_MAC[..]);
    assert!(!msg.flags().broadcast());
    assert_eq!(server_identifier(&msg), Some(SERVER_IP));
    // Lease parameters belong to the ACK, not the release.
    assert!(msg.opts().get(v4::OptionCode::AddressLeaseTime).is_none());
}

#[test]
fn test_build_release_ignores_offer() {
    let lease = test_lease();
    let mut other_offer = lease.offer().clone();
    other_offer.set_yiaddr(Ipv4Addr::new(198, 51, 100, 9));
    other_offer
        .opts_mut()
        .insert(v4::DhcpOption::ServerIdentifier(Ipv4Addr::new(198, 51, 100, 1)));
    let lease = Lease::new(other_offer, lease.ack().clone());

    let msg = build_release_message(&lease, []).unwrap();

    assert_eq!(msg.ciaddr(), YIADDR);
    assert_eq!(server_identifier(&msg), Some(SERVER_IP));
}

#[test]
fn test_build_release_modifiers_override_defaults() {
    let lease = test_lease();
    let forced = Ipv4Addr::new(192, 0, 2, 77);

    let orders = [
        vec![Modifier::ClientIp(forced)],
        vec![
            Modifier::TransactionId(42),
            Modifier::ClientIp(forced),
            Modifier::Option(v4::DhcpOption::Message("bye".to_string())),
        ],
        vec![
            Modifier::Option(v4::DhcpOption::Message("bye".to_string())),
            Modifier::TransactionId(42),
            Modifier::ClientIp(forced),
        ],
    ];

    for modifiers in orders {
        let msg = build_release_message(&lease, modifiers).unwrap();
        assert_eq!(msg.ciaddr(), forced);
        // Untouched defaults survive.
        assert_eq!(msg.chaddr(), &CLIENT_MAC[..]);
        assert_eq!(server_identifier(&msg), Some(SERVER_IP));
    }
}

#[test]
fn test_build_release_broadcast_can_be_overridden() {
    let lease = test_lease();

    let msg = build_release_message(&lease, [Modifier::Broadcast(true)]).unwrap();

    assert!(msg.flags().broadcast());
}

#[test]
fn test_build_release_does_not_touch_lease() {
    let lease = test_lease();
    let ack_before = lease.ack().clone();

    build_release_message(&lease, [Modifier::ClientIp(Ipv4Addr::LOCALHOST)]).unwrap();

    assert_eq!(lease.ack(), &ack_before);
}

#[test]
fn test_build_release_propagates_build_error() {
    let lease = test_lease();

    let err = build_release_message(&lease, [Modifier::HwAddr(Bytes::from(vec![0xee; 17]))])
        .unwrap_err();

    assert_eq!(err, BuildError::HardwareAddressTooLong(17));
}

#[test]
fn test_build_release_rejects_oversized_ack_hlen() {
    let lease = test_lease();
    let mut packet = to_bytes(lease.ack()).unwrap();
    packet[2] = 200;
    let ack = v4::Message::decode(&mut Decoder::new(&packet)).unwrap();
    let lease = Lease::new(lease.offer().clone(), ack);

    let err = build_release_message(&lease, []).unwrap_err();

    assert_eq!(err, BuildError::HardwareAddressTooLong(200));
}

#[test]
fn test_build_release_encodes_and_decodes() {
    let lease = test_lease();

    let msg = build_release_message(&lease, []).unwrap();
    let packet = to_bytes(&msg).unwrap();

    let decoded = v4::Message::decode(&mut Decoder::new(&packet)).unwrap();
    assert_eq!(decoded.xid(), msg.xid());
    assert_eq!(decoded.ciaddr(), YIADDR);
    assert_eq!(decoded.chaddr(), &CLIENT_MAC[..]);
    assert!(matches!(
        decoded.opts().get(v4::OptionCode::MessageType),
        Some(v4::DhcpOption::MessageType(v4::MessageType::Release))
    ));
}
