//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, profile-gated pre-authentication simulation)
//! - Bind server to listener and shut down on Ctrl+C

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::buildinfo::BuildProperties;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::http::handlers::{get_active_profiles, get_build, whoami};
use crate::preauth::PreAuthSimulationLayer;
use crate::profiles::{ActiveProfiles, ProfileConditionalLayer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub profiles: ActiveProfiles,
    pub build: Arc<BuildProperties>,
}

/// Build the Axum router with all middleware layers.
///
/// Fails when the pre-authentication header settings are misaligned.
pub fn build_router(config: &ServerConfig) -> Result<Router> {
    let profiles = ActiveProfiles::new(config.profiles.active.iter().cloned());
    let state = AppState {
        profiles: profiles.clone(),
        build: Arc::new(BuildProperties::from(config.build.clone())),
    };

    let preauth = PreAuthSimulationLayer::from_config(&config.preauth)?;
    let gate = ProfileConditionalLayer::new(preauth, profiles)
        .required_profiles(config.profiles.preauth_required.iter().cloned());

    Ok(Router::new()
        .route("/build", get(get_build))
        .route("/activeProfiles", get(get_active_profiles))
        .route("/whoami", get(whoami))
        .with_state(state)
        .layer(gate)
        .layer(TraceLayer::new_for_http()))
}

/// HTTP server exposing the build API behind simulated pre-authentication.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self {
            router: build_router(config)?,
        })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
