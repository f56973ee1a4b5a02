//! Standalone score server binary.
//!
//! Usage:
//!   cargo run -p score_server -- [--addr 127.0.0.1:4600]
//!
//! Listens for framed JSON score requests: fetch top scores, submit a
//! moderated score.

use std::env;

use anyhow::Context;
use score_server::ScoreServer;
use tracing::info;

fn parse_addr() -> String {
    let args: Vec<String> = env::args().collect();
    let mut addr = "127.0.0.1:4600".to_string();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--addr" && i + 1 < args.len() {
            addr = args[i + 1].clone();
            i += 2;
        } else {
            i += 1;
        }
    }
    addr
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let addr = parse_addr();
    let server = ScoreServer::bind(&addr).await.context("start server")?;
    let local = server.local_addr()?;
    info!(%local, "Score server listening");

    server.run().await
}
