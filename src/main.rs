//! Development server with simulated pre-authentication.
//!
//! ```text
//! preauth-sim --config preauth.toml \
//!     --param preauth.enabled=true \
//!     --param preauth.remoteUser=someusername \
//!     --profile dev
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use preauth_sim::config::{load_config, ServerConfig};
use preauth_sim::observability::init_logging;
use preauth_sim::HttpServer;

#[derive(Parser)]
#[command(name = "preauth-sim")]
#[command(about = "Serve requests with simulated pre-authentication", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Init parameter override, e.g. preauth.remoteUser=alice
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Additional active profile
    #[arg(long = "profile", value_name = "NAME")]
    profiles: Vec<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    tracing::info!("preauth-sim v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    for param in &cli.params {
        config.preauth.apply_param(param)?;
    }
    config.profiles.active.extend(cli.profiles);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        preauth_enabled = config.preauth.enabled,
        active_profiles = ?config.profiles.active,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
