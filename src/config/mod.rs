//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → params.rs (init-parameter overrides from the command line)
//!     → ServerConfig (immutable once the server starts)
//!     → PreAuthConfig::override_table (fails fast on misaligned headers)
//! ```
//!
//! # Design Decisions
//! - All sections default, so an empty file is a valid config
//! - Header names/values stay raw strings until the table is built
//! - Init-parameter keys are an enum, not free-floating constants

pub mod loader;
pub mod params;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use params::{parse_flag, InitParam};
pub use schema::{ListenerConfig, PreAuthConfig, ProfilesConfig, ServerConfig};
