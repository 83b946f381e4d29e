//! portshuttle - TCP port forwarder
//!
//! This binary listens on a local port and relays every accepted connection
//! to a fixed forward target, byte for byte, in both directions.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use portshuttle::{config, Config, ForwardError, Listener, Result};

#[derive(Parser)]
#[command(name = "portshuttle")]
#[command(version = "0.1.0")]
#[command(about = "TCP port forwarder")]
struct Cli {
    /// Local TCP port to listen on
    #[arg(required_unless_present = "config")]
    listen_port: Option<u16>,

    /// Destination host or IP to forward traffic to
    #[arg(required_unless_present = "config")]
    forward_host: Option<String>,

    /// Destination TCP port to forward traffic to
    #[arg(required_unless_present = "config")]
    forward_port: Option<u16>,

    /// Path to configuration file (alternative to the positional arguments)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listen address
    #[arg(long)]
    listen_address: Option<String>,

    /// Enable verbose/debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Priority: --verbose flag, then RUST_LOG env var, then default "info"
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };
    tracing_subscriber::fmt().with_env_filter(&log_level).init();

    info!("Starting portshuttle v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from file or build it from the positional arguments
    let mut config = match &cli.config {
        Some(path) => {
            let config = config::load_config(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => match (cli.listen_port, cli.forward_host.clone(), cli.forward_port) {
            (Some(listen_port), Some(forward_host), Some(forward_port)) => {
                Config::from_args(listen_port, forward_host, forward_port)
            }
            _ => {
                return Err(ForwardError::Config(
                    "listen_port, forward_host and forward_port are required without --config"
                        .to_string(),
                ))
            }
        },
    };

    // Apply CLI overrides (positional arguments win over the config file)
    if let Some(port) = cli.listen_port {
        config.server.listen_port = port;
    }
    if let Some(host) = cli.forward_host {
        config.target.host = host;
    }
    if let Some(port) = cli.forward_port {
        config.target.port = port;
    }
    if let Some(addr) = cli.listen_address {
        config.server.listen_address = addr;
    }

    config.validate().map_err(ForwardError::Config)?;

    let config = Arc::new(config);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

    // A bind failure is fatal and ends the process with a diagnostic
    let listener = Listener::bind(Arc::clone(&config), shutdown_rx).await?;
    let stats = listener.stats();

    info!(
        "Forwarder ready: listening on {}:{} -> {}:{}",
        config.server.listen_address,
        config.server.listen_port,
        config.target.host,
        config.target.port
    );

    // Spawn the listener task
    let listener_handle = tokio::spawn(async move {
        if let Err(e) = listener.run().await {
            error!("Listener error: {}", e);
        }
    });

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("Failed to install SIGTERM handler");
                sigterm.recv().await;
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Send shutdown signal
    let _ = shutdown_tx.send(());

    // Wait for listener to finish
    let _ = listener_handle.await;

    info!(
        "Shutdown complete. Total connections handled: {}",
        stats
            .connections_accepted
            .load(std::sync::atomic::Ordering::Relaxed)
    );

    Ok(())
}
