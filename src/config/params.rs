//! Init-parameter schema for simulated pre-authentication.
//!
//! ```text
//! preauth.enabled       = true
//! preauth.remoteUser    = someusername
//! preauth.headerNames   = header1;header2;header3
//! preauth.headerValues  = value1;mvalue2a,mvalue2b;value3
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::config::loader::ConfigError;
use crate::config::schema::PreAuthConfig;

/// Recognised init-parameter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitParam {
    Enabled,
    RemoteUser,
    HeaderNames,
    HeaderValues,
}

impl InitParam {
    pub const ALL: [InitParam; 4] = [
        InitParam::Enabled,
        InitParam::RemoteUser,
        InitParam::HeaderNames,
        InitParam::HeaderValues,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InitParam::Enabled => "preauth.enabled",
            InitParam::RemoteUser => "preauth.remoteUser",
            InitParam::HeaderNames => "preauth.headerNames",
            InitParam::HeaderValues => "preauth.headerValues",
        }
    }
}

impl fmt::Display for InitParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InitParam {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|param| param.key() == s)
            .ok_or_else(|| ConfigError::UnknownParam(s.to_string()))
    }
}

/// Lenient boolean: `true`, `on`, `yes`, `y` and `t` (any case) are true.
pub fn parse_flag(value: &str) -> bool {
    ["true", "on", "yes", "y", "t"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => parse_flag(&text),
    })
}

impl PreAuthConfig {
    /// Build settings from an init-parameter lookup. Missing keys leave the
    /// corresponding setting absent.
    pub fn from_init_params<F>(lookup: F) -> Self
    where
        F: Fn(InitParam) -> Option<String>,
    {
        let mut config = Self::default();
        for param in InitParam::ALL {
            if let Some(value) = lookup(param) {
                config.set(param, value);
            }
        }
        config
    }

    /// Apply a `key=value` init parameter on top of the current settings.
    pub fn apply_param(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidParam(assignment.to_string()))?;
        let param: InitParam = key.trim().parse()?;
        self.set(param, value.to_string());
        Ok(())
    }

    fn set(&mut self, param: InitParam, value: String) {
        match param {
            InitParam::Enabled => self.enabled = parse_flag(&value),
            InitParam::RemoteUser => self.remote_user = Some(value),
            InitParam::HeaderNames => self.header_names = Some(value),
            InitParam::HeaderValues => self.header_values = Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_flag() {
        for value in ["true", "TRUE", "on", "Yes", "y", "T"] {
            assert!(parse_flag(value), "{value} should be true");
        }
        for value in ["false", "", "1", "no", "enabled", "tru"] {
            assert!(!parse_flag(value), "{value} should be false");
        }
    }

    #[test]
    fn test_keys_round_trip() {
        for param in InitParam::ALL {
            assert_eq!(param.key().parse::<InitParam>().unwrap(), param);
        }
        assert!(matches!(
            "preauth.other".parse::<InitParam>(),
            Err(ConfigError::UnknownParam(_))
        ));
    }

    #[test]
    fn test_from_init_params_missing() {
        let config = PreAuthConfig::from_init_params(|_| None);
        assert_eq!(config, PreAuthConfig::default());
        assert!(config.remote_user.is_none());
        assert!(config.override_table().unwrap().is_empty());
    }

    #[test]
    fn test_from_init_params_example() {
        let params: HashMap<&str, &str> = HashMap::from([
            ("preauth.remoteUser", "inittest"),
            ("preauth.headerNames", "header1;header2;header3"),
            ("preauth.headerValues", "value1;mvalue2a,mvalue2b;value3"),
            ("preauth.enabled", "true"),
        ]);
        let config =
            PreAuthConfig::from_init_params(|param| params.get(param.key()).map(|v| v.to_string()));

        assert!(config.enabled);
        let table = config.override_table().unwrap();
        assert_eq!(table.identity(), Some("inittest"));
        assert_eq!(table.first_value("header1"), Some("value1"));
        assert_eq!(table.values("header2").unwrap(), ["mvalue2a", "mvalue2b"]);
        assert_eq!(table.first_value("header3"), Some("value3"));
    }

    #[test]
    fn test_apply_param() {
        let mut config = PreAuthConfig::default();
        config.apply_param("preauth.remoteUser=alice").unwrap();
        config.apply_param("preauth.enabled=on").unwrap();
        config.apply_param("preauth.headerValues=a=b").unwrap();

        assert_eq!(config.remote_user.as_deref(), Some("alice"));
        assert!(config.enabled);
        assert_eq!(config.header_values.as_deref(), Some("a=b"));

        assert!(matches!(
            config.apply_param("preauth.enabled"),
            Err(ConfigError::InvalidParam(_))
        ));
    }
}
