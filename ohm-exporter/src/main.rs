//! OpenHardwareMonitor Exporter
//!
//! Serves OpenHardwareMonitor sensor readings to Prometheus over HTTP.

mod web;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use ohm_collector::config::Config;
use ohm_collector::exporter::Exporter;
use ohm_collector::openhardwaremonitor::{SensorCollector, SUBSYSTEM};
use prometheus_client::registry::Registry;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ohm-exporter")]
#[command(about = "Prometheus exporter for OpenHardwareMonitor sensors")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to serve metrics on
    #[arg(short, long, default_value = "0.0.0.0:9182")]
    listen: SocketAddr,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };

    let logger = tracing::info_span!("exporter");
    let mut exporter = Exporter::new(&logger, &config.namespace);
    exporter.register(
        SUBSYSTEM,
        Box::new(SensorCollector::with_config(&logger, &config)),
    );
    info!(
        namespace = %config.namespace,
        policy = ?config.open_hardware_monitor.policy,
        wmi_namespace = %config.open_hardware_monitor.wmi_namespace,
        "Registered collector {}",
        SUBSYSTEM
    );

    let mut registry = Registry::default();
    registry.register_collector(Box::new(exporter));

    let app = web::create_router(Arc::new(registry));
    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cli.listen))?;
    info!("Serving metrics on http://{}/metrics", cli.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_listen_address() {
        let cli = Cli::parse_from(["ohm-exporter"]);
        assert_eq!("0.0.0.0:9182".parse::<SocketAddr>().unwrap(), cli.listen);
        assert!(cli.config.is_none());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = Config::from_toml_str(include_str!("../config/default.toml")).unwrap();
        assert_eq!(Config::default(), config);
    }
}
