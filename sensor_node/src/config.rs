// runtime configuration (ids, keys, addresses, measurement cadence)
use anyhow::Result;
use clap::Parser;

#[derive(Debug, Clone)]
pub struct Config {
    pub node_id: u8,
    pub gateway_addr: String,
    pub bind_addr: String,
    pub aes_key_hex: String,
    pub mac_key_hex: String,
    pub measure_ms: u64,
    pub poll_ms: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// This node's sender id on the link (1..=255; 0 is reserved).
    #[arg(long, default_value_t = 1)]
    pub node_id: u8,
    /// Where uplink frames go (UDP stand-in for the LoRa air interface).
    #[arg(long, default_value = "127.0.0.1:7878")]
    pub gateway_addr: String,
    /// Where downlink command frames arrive.
    #[arg(long, default_value = "0.0.0.0:7879")]
    pub bind_addr: String,
    /// AES-128 key, 32 hex chars.
    #[arg(long, default_value = "000102030405060708090a0b0c0d0e0f")]
    pub aes_key_hex: String,
    /// HMAC-SHA256 key, hex.
    #[arg(long, default_value = "2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b")]
    pub mac_key_hex: String,
    /// Measurement interval.
    #[arg(long, default_value_t = 5000)]
    pub measure_ms: u64,
    /// Downlink radio poll interval.
    #[arg(long, default_value_t = 50)]
    pub poll_ms: u64,
}

impl Cli {
    pub fn parse_and_build_config() -> Result<Config> {
        let c = <Cli as Parser>::parse();
        if c.node_id == 0 {
            anyhow::bail!("node_id 0 is reserved and never a legitimate sender");
        }
        Ok(Config {
            node_id: c.node_id,
            gateway_addr: c.gateway_addr,
            bind_addr: c.bind_addr,
            aes_key_hex: c.aes_key_hex,
            mac_key_hex: c.mac_key_hex,
            measure_ms: c.measure_ms,
            poll_ms: c.poll_ms,
        })
    }
}
