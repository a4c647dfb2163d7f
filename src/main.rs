//! Doctor directory service.
//!
//! # Architecture Overview
//!
//! ```text
//!   upstream JSON ──GET once──▶ source ──▶ normalize ──▶ Directory (ArcSwap)
//!                                                            │
//!   client ──▶ /doctors?search=…&sortBy=… ──▶ decode ──▶ engine ──▶ JSON
//!                                                 │
//!                                                 └──▶ encode ──▶ canonical query
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use doctor_directory::config::{load_config, DirectoryConfig};
use doctor_directory::directory::HttpDoctorSource;
use doctor_directory::lifecycle::signals::trigger_on_ctrl_c;
use doctor_directory::observability::{logging, metrics};
use doctor_directory::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "doctor-directory")]
#[command(about = "Doctor directory search API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DirectoryConfig::default(),
    };

    logging::init_logging(&config.observability.log_level)?;
    tracing::info!("doctor-directory v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        source = %config.source.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let source = HttpDoctorSource::new(&config.source)?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        trigger_on_ctrl_c(&signal_shutdown).await;
    });

    let server = HttpServer::new(config);
    server.run(listener, source, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
