//! Server binary: flag parsing, logging, wiring, serve.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jmaplite::server::http;
use jmaplite::{Dispatcher, InMemoryStore, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "jmaplite", about = "Batched method server for task records")]
struct Args {
    /// Address to bind the HTTP listener to.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Origin allowed to make cross-origin requests.
    #[arg(long, default_value = "http://localhost:3000")]
    cors_origin: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Arc::new(ServerConfig {
        bind_addr: args.bind,
        cors_origin: args.cors_origin,
        base_url: format!("http://{}", args.bind),
        ..ServerConfig::default()
    });

    let allow_origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("invalid CORS origin: {}", config.cors_origin))?;

    let store = Arc::new(InMemoryStore::new());
    let dispatcher = Arc::new(Dispatcher::new(store, config.clone()));
    let app = http::router(dispatcher, allow_origin);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install ctrl-c handler");
    }
}
