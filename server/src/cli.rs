//! Command-line arguments and process setup for the `sles-server` binary.

use anyhow::{Result, anyhow, bail};
use chrono::Duration;
use clap::{Parser, ValueEnum};
use sles_vault::VaultConfig;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sles-server")]
#[command(about = "Secure license encryption service")]
pub struct Args {
    /// Address to bind the HTTP API to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Directory for encrypted and decrypted files
    #[arg(short, long, default_value = "./encrypted_files")]
    pub output_dir: PathBuf,

    /// Lifetime of share links, in seconds
    #[arg(long, default_value = "3600")]
    pub link_ttl_secs: i64,

    /// Base URL placed in share links
    #[arg(long, default_value = "http://localhost:3000")]
    pub public_url: String,

    /// Log line format
    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the vault settings, rejecting a link lifetime that is not
    /// positive or does not fit a duration.
    pub fn vault_config(&self) -> Result<VaultConfig> {
        if self.link_ttl_secs <= 0 {
            bail!("--link-ttl-secs must be positive, got {}", self.link_ttl_secs);
        }
        let Some(default_link_ttl) = Duration::try_seconds(self.link_ttl_secs) else {
            bail!("--link-ttl-secs {} is out of range", self.link_ttl_secs);
        };
        Ok(VaultConfig {
            output_dir: self.output_dir.clone(),
            default_link_ttl,
            public_base_url: self.public_url.clone(),
        })
    }

    /// Installs the global tracing subscriber.
    pub fn init_tracing(&self) -> Result<()> {
        let level = if self.verbose { Level::DEBUG } else { Level::INFO };
        let builder = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false);
        let installed = match self.log_format {
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
    }
}
