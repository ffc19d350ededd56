// src/main.rs — measuring node: periodic depth uplink + downlink commands.
mod commands;
mod config;
mod measurement;
mod net;
mod ota;
mod uplink;

use anyhow::Result;
use radio_protocol::StaticKeyStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // -------- logging ----------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sensor_node=info".parse().unwrap())
                .add_directive("radio_protocol=info".parse().unwrap()),
        )
        .compact()
        .init();

    // -------- config + keys ----------
    let cfg = config::Cli::parse_and_build_config()?;
    let keys = StaticKeyStore::from_hex(&cfg.aes_key_hex, &cfg.mac_key_hex)?;
    info!(node_id = cfg.node_id, gateway = %cfg.gateway_addr, "sensor node starting");

    // -------- radio (UDP stand-in), one socket per direction ----------
    let tx_radio = net::UdpRadio::connect(&cfg.gateway_addr)?;
    let rx_radio = net::UdpRadio::bind(&cfg.bind_addr)?;

    // -------- subsystems ----------
    uplink::spawn(cfg.clone(), keys.clone(), tx_radio);
    commands::spawn(cfg.clone(), keys, rx_radio);

    info!("sensor node running. Press Ctrl+C to stop…");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(?e, "failed to install Ctrl+C handler");
    }
    info!("shutdown signal received; exiting.");
    Ok(())
}
