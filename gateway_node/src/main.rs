// src/main.rs — relay node: uplink telemetry in, downlink commands out.
mod commands;
mod config;
mod history;
mod measurement;
mod net;
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
                .add_directive("gateway_node=info".parse().unwrap())
                .add_directive("radio_protocol=info".parse().unwrap()),
        )
        .compact()
        .init();

    // -------- config + keys ----------
    let cfg = config::Cli::parse_and_build_config()?;
    let keys = StaticKeyStore::from_hex(&cfg.aes_key_hex, &cfg.mac_key_hex)?;
    info!(
        allowed = ?cfg.allowed_ids,
        bind = %cfg.bind_addr,
        "gateway node starting"
    );

    // -------- radio (UDP stand-in), one socket per direction ----------
    let rx_radio = net::UdpRadio::bind(&cfg.bind_addr)?;
    let tx_radio = net::UdpRadio::connect(&cfg.sensor_addr)?;

    // -------- subsystems ----------
    uplink::spawn(cfg.clone(), keys.clone(), rx_radio);
    commands::spawn_sender(keys, tx_radio);

    // Optional one-shot operator action from the command line.
    if let (Some(target_id), Some(enable)) = (cfg.ota_target, cfg.ota_enable) {
        if let Some(tx) = commands::COMMANDS.get() {
            let _ = tx
                .send(commands::OtaRequest { target_id, enable })
                .await;
        }
    } else if cfg.ota_target.is_some() || cfg.ota_enable.is_some() {
        warn!("--ota-target and --ota must be given together; ignoring");
    }

    info!("gateway node running. Press Ctrl+C to stop…");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(?e, "failed to install Ctrl+C handler");
    }
    info!("shutdown signal received; exiting.");
    Ok(())
}
