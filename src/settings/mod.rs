use crate::config::{
    AddressFamily, ConfigError, DEFAULT_DEAD_TIMEOUT_MS, DEFAULT_INTERVAL_SECS,
    DEFAULT_TIMEOUT_MS, MonitorConfig,
};
use crate::data_model::settings::AppSettings;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "pingpulse")]
#[command(about = "Real-time ICMP latency, jitter and loss monitor", long_about = None)]
pub struct CliArgs {
    /// Host name or address to probe
    #[arg(value_name = "HOST")]
    host: String,

    /// Per-probe reply timeout (ms)
    #[arg(short = 'W', long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u64,

    /// Pause between probes (seconds)
    #[arg(short = 'i', long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: f64,

    /// Value plotted for lost probes (ms, between the timeout and 10000)
    #[arg(short = 'D', long, default_value_t = DEFAULT_DEAD_TIMEOUT_MS)]
    dead_timeout: f64,

    /// Resolve and probe over IPv6
    #[arg(short = '6', long)]
    ipv6: bool,

    /// Write diagnostics to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the final statistics as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub fn load_from_cli() -> Result<AppSettings, SettingsError> {
    let args = CliArgs::parse();
    from_args(args)
}

pub fn from_args(args: CliArgs) -> Result<AppSettings, SettingsError> {
    let host = args.host.trim().to_string();
    if host.is_empty() {
        return Err(SettingsError::EmptyHost);
    }

    let family = if args.ipv6 {
        AddressFamily::V6
    } else {
        AddressFamily::V4
    };
    let config = MonitorConfig::new(args.timeout, args.interval, args.dead_timeout, family)?;

    Ok(AppSettings {
        host,
        config,
        log_file: args.log_file,
        json: args.json,
    })
}
