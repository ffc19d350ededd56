// runtime configuration (allow-list, keys, addresses)
use anyhow::Result;
use clap::Parser;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub sensor_addr: String,
    pub allowed_ids: Vec<u8>,
    pub aes_key_hex: String,
    pub mac_key_hex: String,
    pub poll_ms: u64,
    pub ota_target: Option<u8>,
    pub ota_enable: Option<bool>,
}

#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Where uplink frames arrive (UDP stand-in for the LoRa air interface).
    #[arg(long, default_value = "0.0.0.0:7878")]
    pub bind_addr: String,
    /// Where downlink command frames go.
    #[arg(long, default_value = "127.0.0.1:7879")]
    pub sensor_addr: String,
    /// Comma-separated sender ids the relay will process at all.
    #[arg(long, default_value = "1")]
    pub allowed_ids: String,
    /// AES-128 key, 32 hex chars.
    #[arg(long, default_value = "000102030405060708090a0b0c0d0e0f")]
    pub aes_key_hex: String,
    /// HMAC-SHA256 key, hex.
    #[arg(long, default_value = "2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b")]
    pub mac_key_hex: String,
    /// Uplink radio poll interval.
    #[arg(long, default_value_t = 50)]
    pub poll_ms: u64,
    /// Send one OTA-AP command to this node id at startup (operator action).
    #[arg(long)]
    pub ota_target: Option<u8>,
    /// The desired OTA-AP state for --ota-target: on or off.
    #[arg(long)]
    pub ota: Option<String>,
}

impl Cli {
    pub fn parse_and_build_config() -> Result<Config> {
        let c = <Cli as Parser>::parse();
        Self::build(c)
    }

    fn build(c: Cli) -> Result<Config> {
        let allowed_ids = parse_id_list(&c.allowed_ids)?;
        if allowed_ids.is_empty() {
            anyhow::bail!("allowed_ids must name at least one sender id");
        }
        let ota_enable = match c.ota.as_deref() {
            None => None,
            Some("on") => Some(true),
            Some("off") => Some(false),
            Some(other) => anyhow::bail!("--ota must be 'on' or 'off', got '{other}'"),
        };
        Ok(Config {
            bind_addr: c.bind_addr,
            sensor_addr: c.sensor_addr,
            allowed_ids,
            aes_key_hex: c.aes_key_hex,
            mac_key_hex: c.mac_key_hex,
            poll_ms: c.poll_ms,
            ota_target: c.ota_target,
            ota_enable,
        })
    }
}

fn parse_id_list(s: &str) -> Result<Vec<u8>> {
    let mut ids = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id: u8 = part
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid sender id '{part}'"))?;
        if id == 0 {
            anyhow::bail!("sender id 0 is reserved and cannot be allow-listed");
        }
        ids.push(id);
    }
    Ok(ids)
}
