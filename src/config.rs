use clap::Parser;
use std::{net::Ipv4Addr, path::PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Release a DHCPv4 lease", long_about = None)]
pub struct Args {
    /// The network interface the lease was obtained on (e.g., 'eth0')
    #[arg(short, long)]
    pub interface: String,

    /// File holding the raw DHCPOFFER datagram of the lease
    #[arg(long)]
    pub offer: PathBuf,

    /// File holding the raw DHCPACK datagram of the lease
    #[arg(long)]
    pub ack: PathBuf,

    /// Report this address in ciaddr instead of the one from the ACK
    #[arg(long)]
    pub client_ip: Option<Ipv4Addr>,

    /// Free-form text sent to the server in option 56
    #[arg(short, long)]
    pub message: Option<String>,
}

pub struct ClientConfig {
    pub interface: String,
    pub client_port: u16,
}

impl ClientConfig {
    pub fn new(interface: String) -> Self {
        Self {
            interface,
            client_port: 68,
        }
    }
}

impl From<&Args> for ClientConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.interface.clone())
    }
}
