//! Leases obtained from a completed DORA exchange.

use crate::{error::LeaseError, v4::modifier};
use dhcproto::{v4, Decodable as _};
use std::{
    net::Ipv4Addr,
    path::Path,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// A DHCPv4 lease: the OFFER and ACK that established it and the time it was
/// accepted.
///
/// Both messages are shared and never mutated, so a `Lease` can be cloned
/// cheaply and read from several tasks at once.
#[derive(Debug, Clone)]
pub struct Lease {
    offer: Arc<v4::Message>,
    ack: Arc<v4::Message>,
    creation_time: SystemTime,
}

impl Lease {
    /// Creates a lease accepted now.
    pub fn new(offer: impl Into<Arc<v4::Message>>, ack: impl Into<Arc<v4::Message>>) -> Self {
        Self {
            offer: offer.into(),
            ack: ack.into(),
            creation_time: SystemTime::now(),
        }
    }

    pub fn with_creation_time(mut self, creation_time: SystemTime) -> Self {
        self.creation_time = creation_time;
        self
    }

    /// Decodes a lease from the wire bytes of its OFFER and ACK.
    pub fn from_wire(offer: &[u8], ack: &[u8]) -> Result<Self, LeaseError> {
        let offer = decode(offer, "OFFER")?;
        let ack = decode(ack, "ACK")?;
        check_hlen(&offer, "OFFER")?;
        check_hlen(&ack, "ACK")?;

        match modifier::message_type(&ack) {
            Some(v4::MessageType::Ack) => Ok(Self::new(offer, ack)),
            Some(other) => Err(LeaseError::NotAnAck(format!("{other:?}"))),
            None => Err(LeaseError::NotAnAck("no message type".to_string())),
        }
    }

    /// Reads captured OFFER and ACK datagrams from disk.
    pub async fn load(
        offer_path: impl AsRef<Path>,
        ack_path: impl AsRef<Path>,
    ) -> Result<Self, LeaseError> {
        let offer = read(offer_path.as_ref()).await?;
        let ack = read(ack_path.as_ref()).await?;
        Self::from_wire(&offer, &ack)
    }

    pub fn offer(&self) -> &v4::Message {
        &self.offer
    }

    pub fn ack(&self) -> &v4::Message {
        &self.ack
    }

    pub fn creation_time(&self) -> SystemTime {
        self.creation_time
    }

    pub fn assigned_address(&self) -> Ipv4Addr {
        self.ack.yiaddr()
    }

    pub fn server_identifier(&self) -> Option<Ipv4Addr> {
        modifier::server_identifier(&self.ack)
    }

    pub fn subnet_mask(&self) -> Option<Ipv4Addr> {
        match self.ack.opts().get(v4::OptionCode::SubnetMask) {
            Some(v4::DhcpOption::SubnetMask(mask)) => Some(*mask),
            _ => None,
        }
    }

    pub fn routers(&self) -> Option<&[Ipv4Addr]> {
        match self.ack.opts().get(v4::OptionCode::Router) {
            Some(v4::DhcpOption::Router(routers)) => Some(routers.as_slice()),
            _ => None,
        }
    }

    pub fn dns_servers(&self) -> Option<&[Ipv4Addr]> {
        match self.ack.opts().get(v4::OptionCode::DomainNameServer) {
            Some(v4::DhcpOption::DomainNameServer(dns)) => Some(dns.as_slice()),
            _ => None,
        }
    }

    pub fn lease_duration(&self) -> Option<Duration> {
        match self.ack.opts().get(v4::OptionCode::AddressLeaseTime) {
            Some(v4::DhcpOption::AddressLeaseTime(secs)) => Some(Duration::from_secs(*secs as u64)),
            _ => None,
        }
    }

    /// When the lease runs out, if the ACK granted a finite lease time.
    pub fn expires_at(&self) -> Option<SystemTime> {
        // 0xffffffff means infinite (RFC 2132, section 9.2)
        match self.ack.opts().get(v4::OptionCode::AddressLeaseTime) {
            Some(v4::DhcpOption::AddressLeaseTime(u32::MAX)) => None,
            _ => self
                .lease_duration()
                .and_then(|duration| self.creation_time.checked_add(duration)),
        }
    }
}

fn decode(bytes: &[u8], kind: &'static str) -> Result<v4::Message, LeaseError> {
    v4::Message::decode(&mut v4::Decoder::new(bytes))
        .map_err(|source| LeaseError::Decode { kind, source })
}

/// The decoder accepts any `hlen`, but `chaddr()` slices by it.
fn check_hlen(msg: &v4::Message, kind: &'static str) -> Result<(), LeaseError> {
    if usize::from(msg.hlen()) > modifier::CHADDR_LEN {
        return Err(LeaseError::HardwareAddressLength {
            kind,
            hlen: msg.hlen(),
        });
    }
    Ok(())
}

async fn read(path: &Path) -> Result<Vec<u8>, LeaseError> {
    tokio::fs::read(path).await.map_err(|source| LeaseError::Read {
        path: path.to_path_buf(),
        source,
    })
}
