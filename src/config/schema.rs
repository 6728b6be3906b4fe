//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::params::deserialize_flag;
use crate::error::Result;
use crate::preauth::OverrideTable;

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Simulated pre-authentication.
    pub preauth: PreAuthConfig,

    /// Active and required environment profiles.
    pub profiles: ProfilesConfig,

    /// Build properties served by `/build` (e.g. `"git.branch" = "main"`).
    pub build: BTreeMap<String, String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Simulated pre-authentication settings.
///
/// `header_names` is `name1;name2`, `header_values` is `v1;v2a,v2b`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PreAuthConfig {
    /// Whether requests are decorated at all. Accepts booleans or
    /// `yes`/`on`/`y`/`t`/`true` strings.
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,

    /// Identity to report instead of the request's own.
    pub remote_user: Option<String>,

    /// Header names to override, `;` separated.
    pub header_names: Option<String>,

    /// Value groups per header, `;` separated, values within a group `,` separated.
    pub header_values: Option<String>,
}

impl PreAuthConfig {
    /// Parse the raw header settings into an `OverrideTable`.
    pub fn override_table(&self) -> Result<OverrideTable> {
        OverrideTable::parse(
            self.remote_user.clone(),
            self.header_names.as_deref(),
            self.header_values.as_deref(),
        )
    }
}

/// Environment profile settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Profiles active in this environment.
    pub active: Vec<String>,

    /// Profiles that must all be active for pre-authentication simulation
    /// to be installed. Empty means no requirement.
    pub preauth_required: Vec<String>,
}
