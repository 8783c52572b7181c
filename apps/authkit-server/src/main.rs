#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod config;

use config::{AppConfig, LoggingConfig};

/// HTTP server guarding its routes with pluggable authentication strategies
/// and permission policies.
#[derive(Parser, Debug)]
#[command(name = "authkit-server", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{cfg:#?}");
        return Ok(());
    }

    init_logging(&cfg.logging);

    let authenticator = Arc::new(app::build_authenticator(&cfg)?);
    tracing::info!(
        strategies = ?authenticator.strategy_names().collect::<Vec<_>>(),
        app_groups = authenticator.app_groups().len(),
        policies = cfg.policies.len(),
        "Authenticator ready"
    );

    let router = app::build_router(&cfg, authenticator)?;

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!(addr = %cfg.server.bind_addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

fn init_logging(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
