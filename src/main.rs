use clap::Parser;
use dhcproto::v4;
use herald_release::{error::report, Args, ClientConfig, DhcpClient, HeraldError, Lease, Modifier};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", report(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), HeraldError> {
    let lease = Lease::load(&args.offer, &args.ack).await?;
    tracing::info!(
        "Loaded lease for {} from server {:?}",
        lease.assigned_address(),
        lease.server_identifier()
    );

    let config = ClientConfig::from(&args);
    let client = DhcpClient::new(&config)?;

    let mut modifiers = Vec::new();
    if let Some(ip) = args.client_ip {
        modifiers.push(Modifier::ClientIp(ip));
    }
    if let Some(text) = args.message {
        modifiers.push(Modifier::Option(v4::DhcpOption::Message(text)));
    }

    client.release(Some(&lease), modifiers).await?;
    Ok(())
}
