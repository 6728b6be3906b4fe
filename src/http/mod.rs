//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware wiring)
//!     → TraceLayer
//!     → ProfileConditionalLayer(PreAuthSimulationLayer)
//!     → handlers.rs (/build, /activeProfiles, /whoami)
//! ```

pub mod handlers;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
