//! # Herald Release - DHCPv4 lease teardown
//!
//! Releases a DHCPv4 lease obtained through a DORA (Discover, Offer, Request,
//! Acknowledge) exchange, as described in RFC 2131 section 4.4.4. The
//! DHCPRELEASE is derived entirely from the lease's ACK and unicast to the
//! server that granted it.
//!
//! ## Features
//!
//! - Release messages built from ordered, overridable [`Modifier`]s
//! - Unicast delivery to the server identifier on port 67
//! - Pluggable transport and message logging
//! - Asynchronous operation using Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use herald_release::{ClientConfig, DhcpClient, Lease};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lease = Lease::load("offer.bin", "ack.bin").await?;
//!     let client = DhcpClient::new(&ClientConfig::new("eth0".to_string()))?;
//!     client.release(Some(&lease), []).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod lease;
pub mod logger;
pub mod network;
pub mod v4;

pub use client::{DhcpClient, SERVER_PORT};
pub use config::{Args, ClientConfig};
pub use error::{BuildError, HeraldError, LeaseError, ReleaseError};
pub use lease::Lease;
pub use logger::{MessageLogger, NoopLogger, TracingLogger};
pub use network::Transport;
pub use v4::{build_release_message, Modifier};
