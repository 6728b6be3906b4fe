//! Environment profiles and profile-conditional middleware.
//!
//! # Design Decisions
//! - Profiles are fixed at startup, so the gate is decided once per layer
//!   application instead of once per request
//! - A gated delegate is applied only when *all* required profiles are active
//! - `!name` is satisfied when `name` is not active
//! - With no profiles active, the `default` profile counts as active

pub mod conditional;

pub use conditional::ProfileConditionalLayer;

use std::sync::Arc;

/// Profile considered active when no other profile is.
pub const DEFAULT_PROFILE: &str = "default";

/// Set of profiles active in the running environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProfiles(Arc<[String]>);

impl Default for ActiveProfiles {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl ActiveProfiles {
    pub fn new<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for profile in profiles {
            let profile = profile.into();
            if !names.contains(&profile) {
                names.push(profile);
            }
        }
        Self(names.into())
    }

    /// Whether `profile` is satisfied. A leading `!` negates the match.
    pub fn accepts(&self, profile: &str) -> bool {
        match profile.strip_prefix('!') {
            Some(negated) => !self.is_active(negated),
            None => self.is_active(profile),
        }
    }

    fn is_active(&self, profile: &str) -> bool {
        if self.0.is_empty() {
            return profile == DEFAULT_PROFILE;
        }
        self.0.iter().any(|active| active == profile)
    }

    /// Whether every one of `required` is active. Vacuously true when empty.
    pub fn accepts_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|profile| self.accepts(profile.as_ref()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all() {
        let active = ActiveProfiles::new(["foo", "bar"]);

        assert!(active.accepts_all::<&str>(&[]));
        assert!(active.accepts_all(&["foo"]));
        assert!(active.accepts_all(&["foo", "bar"]));
        assert!(!active.accepts_all(&["foo", "bar", "baz"]));
        assert!(!ActiveProfiles::default().accepts_all(&["foo"]));
    }

    #[test]
    fn test_negated_profile() {
        let active = ActiveProfiles::new(["dev"]);

        assert!(active.accepts("!prod"));
        assert!(!active.accepts("!dev"));
        assert!(active.accepts_all(&["dev", "!prod"]));
        assert!(!ActiveProfiles::new(["prod"]).accepts("!prod"));
        assert!(ActiveProfiles::default().accepts("!prod"));
    }

    #[test]
    fn test_default_profile_only_when_none_active() {
        assert!(ActiveProfiles::default().accepts(DEFAULT_PROFILE));
        assert!(!ActiveProfiles::default().accepts("!default"));
        assert!(!ActiveProfiles::new(["dev"]).accepts(DEFAULT_PROFILE));
        assert!(ActiveProfiles::new(["dev", "default"]).accepts(DEFAULT_PROFILE));
    }

    #[test]
    fn test_duplicates_collapse() {
        let active = ActiveProfiles::new(["dev", "dev", "local"]);
        assert_eq!(active.as_slice(), ["dev", "local"]);
    }
}
