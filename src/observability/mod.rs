//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing` in every subsystem
//! - Filter taken from `RUST_LOG` when set, otherwise a debug-level default
//! - HTTP request spans come from `tower_http::trace::TraceLayer`

pub mod logging;

pub use logging::init_logging;
