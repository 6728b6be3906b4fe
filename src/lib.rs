//! Simulated pre-authentication for local development.
//!
//! Decorates incoming requests so downstream handlers see a configured
//! remote user and header values in place of (or ahead of) the ones the
//! client actually sent, optionally gated on active environment profiles,
//! and serves project build information.

pub mod buildinfo;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod preauth;
pub mod profiles;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use http::HttpServer;
pub use preauth::{OverrideTable, PreAuthRequest, PreAuthSimulationLayer, RequestView};
pub use profiles::{ActiveProfiles, ProfileConditionalLayer};
