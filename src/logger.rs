//! Diagnostics for messages the client has put on the wire.

use dhcproto::v4;

/// Receives every message the client has successfully sent.
pub trait MessageLogger {
    fn print_message(&self, prefix: &str, msg: &v4::Message);
}

/// Writes sent messages to the `tracing` subscriber at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl MessageLogger for TracingLogger {
    fn print_message(&self, prefix: &str, msg: &v4::Message) {
        tracing::debug!(
            xid = msg.xid(),
            ciaddr = %msg.ciaddr(),
            chaddr = %format_hwaddr(msg.chaddr()),
            broadcast = msg.flags().broadcast(),
            "{prefix} {:?}",
            msg.opts()
        );
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl MessageLogger for NoopLogger {
    fn print_message(&self, _prefix: &str, _msg: &v4::Message) {}
}

fn format_hwaddr(addr: &[u8]) -> String {
    addr.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hwaddr_is_colon_separated_hex() {
        assert_eq!(
            format_hwaddr(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            "00:11:22:33:44:55"
        );
        assert_eq!(format_hwaddr(&[]), "");
    }
}
