//! DHCPv4 protocol implementation
//!
//! This module contains the DHCPv4-specific implementation including:
//! - Modifier based message construction
//! - DHCPRELEASE construction from a lease

pub mod modifier;
pub mod release;

#[cfg(test)]
mod tests;

pub use modifier::{new_message, prepend_modifiers, MessageBuilder, Modifier};
pub use release::build_release_message;
