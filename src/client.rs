//! DHCP client implementation
//!
//! This module drives the release of a lease:
//! - Building the DHCPRELEASE from the lease
//! - Unicasting it to the server that granted the lease
//! - Reporting the sent message

use crate::{
    config::ClientConfig,
    error::{HeraldError, ReleaseError},
    lease::Lease,
    logger::{MessageLogger, TracingLogger},
    network::Transport,
    v4::{build_release_message, modifier::to_bytes, Modifier},
};
use std::net::{SocketAddr, SocketAddrV4};
use tokio::net::UdpSocket;

/// UDP port DHCP servers listen on.
pub const SERVER_PORT: u16 = 67;

pub struct DhcpClient<T = UdpSocket, L = TracingLogger> {
    transport: T,
    logger: L,
}

impl DhcpClient {
    /// Binds the client port on the configured interface.
    pub fn new(config: &ClientConfig) -> Result<Self, HeraldError> {
        let socket = crate::network::new_tokio_socket_bound_to_device(
            &config.interface,
            config.client_port,
        )?;
        tracing::debug!(
            "Bound to interface '{}' port {}",
            config.interface,
            config.client_port
        );
        Ok(Self::with_transport(socket, TracingLogger))
    }
}

impl<T: Transport, L: MessageLogger> DhcpClient<T, L> {
    /// Wraps an already usable transport. The client never reconfigures it.
    pub fn with_transport(transport: T, logger: L) -> Self {
        Self { transport, logger }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Sends a DHCPRELEASE for `lease`, built by [`build_release_message`]
    /// with `modifiers` applied after the defaults.
    ///
    /// The release is unicast to the server identifier of the lease's ACK on
    /// port 67 (RFC 2131, section 4.4.4) no matter how the transport or the
    /// modifiers are set up. Nothing is retried: each call sends at most one
    /// datagram and every failure is returned to the caller.
    ///
    /// Some servers only accept a release whose source is the leased address;
    /// bind the transport to that address for them.
    pub async fn release<I>(&self, lease: Option<&Lease>, modifiers: I) -> Result<(), ReleaseError>
    where
        I: IntoIterator<Item = Modifier>,
    {
        let lease = lease.ok_or(ReleaseError::InvalidArgument)?;

        let msg = build_release_message(lease, modifiers).map_err(ReleaseError::Build)?;
        let server_ip = lease
            .server_identifier()
            .ok_or(ReleaseError::MissingServerIdentifier)?;
        let packet = to_bytes(&msg).map_err(ReleaseError::Encode)?;

        let target = SocketAddr::V4(SocketAddrV4::new(server_ip, SERVER_PORT));
        let sent = self.transport.send_to(&packet, target).await.map_err(|e| {
            tracing::error!("Failed to send release to {}: {}", target, e);
            e
        })?;

        tracing::info!(
            "Released {} to {} ({} bytes)",
            msg.ciaddr(),
            target,
            sent
        );
        self.logger.print_message("sent message:", &msg);
        Ok(())
    }
}
