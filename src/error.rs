use crate::network::SocketError;
use dhcproto::error::{DecodeError, EncodeError};
use std::{error::Error as StdError, io, path::PathBuf};
use thiserror::Error;

/// Rejections raised while assembling a message from its modifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("hardware address is {0} bytes, chaddr holds at most 16")]
    HardwareAddressTooLong(usize),

    #[error("message has no DHCP message type option")]
    MissingMessageType,
}

/// Failures of a single release attempt, one variant per phase.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("invalid argument: no lease to release")]
    InvalidArgument,

    #[error("failed to create release message")]
    Build(#[source] BuildError),

    #[error("failed to encode release message")]
    Encode(#[source] EncodeError),

    #[error("acknowledge carries no server identifier to unicast the release to")]
    MissingServerIdentifier,

    #[error(transparent)]
    Transport(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum LeaseError {
    #[error("failed to decode {kind} message")]
    Decode {
        kind: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("{kind} declares a {hlen} byte hardware address, chaddr holds at most 16")]
    HardwareAddressLength { kind: &'static str, hlen: u8 },

    #[error("expected a DHCP ACK, found {0}")]
    NotAnAck(String),

    #[error("failed to read lease file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum HeraldError {
    #[error("Socket operation failed")]
    Socket(#[from] SocketError),

    #[error("Lease could not be loaded")]
    Lease(#[from] LeaseError),

    #[error("Release failed")]
    Release(#[from] ReleaseError),
}

/// Renders an error followed by each of its sources, separated by `: `.
pub fn report(err: &dyn StdError) -> String {
    let mut report = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        report.push_str(": ");
        report.push_str(&cause.to_string());
        source = cause.source();
    }
    report
}
