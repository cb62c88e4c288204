//! Secure License Encryption Service
//!
//! Issues time-bound and usage-limited licenses, encrypts uploaded files
//! under them, and hands out short-lived links to decrypted copies.
//!
//! Usage:
//!   sles-server --port 3000 --output-dir ./encrypted_files --log-format json
//!
//! All license and binding state is in memory and lost on restart; only the
//! artifact files in the output directory persist.

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use sles_server::{Args, build_router};
use sles_vault::Vault;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.init_tracing()?;

    let vault = Vault::open(args.vault_config()?).context("Failed to open output directory")?;
    info!("Share links point at {}", vault.config().public_base_url);
    let app = build_router(Arc::new(vault));

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening and serving on {}", addr);
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
