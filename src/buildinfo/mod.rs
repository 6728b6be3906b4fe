//! Project build information.
//!
//! # Properties
//! - `projectVersion`: version of the deployed project
//! - `git.tags`: tags on the built commit (release builds)
//! - `git.branch`: branch the build came from
//! - `git.commit.id.abbrev`: abbreviated commit id, reported as the build number
//! - `git.dirty`: whether the working copy had local modifications
//! - `git.build.time`: build timestamp
//!
//! # Design Decisions
//! - The branch is only reported for untagged (snapshot) builds
//! - A missing `git.dirty` is reported as dirty

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const GIT_BUILD_TIME: &str = "git.build.time";
pub const GIT_BRANCH: &str = "git.branch";
pub const GIT_COMMIT_ID_ABBREV: &str = "git.commit.id.abbrev";
pub const GIT_DIRTY: &str = "git.dirty";
pub const GIT_TAGS: &str = "git.tags";
pub const PROJECT_VERSION: &str = "projectVersion";

/// Flat property lookup backing the build endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties(BTreeMap<String, String>);

impl BuildProperties {
    pub fn new(properties: BTreeMap<String, String>) -> Self {
        Self(properties)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Assemble the current `Build` from the properties.
    pub fn build(&self) -> Build {
        let owned = |key: &str| self.get(key).map(str::to_string);

        let tagged = self.get(GIT_TAGS).is_some_and(|tags| !tags.is_empty());
        let dirty = self
            .get(GIT_DIRTY)
            .map_or(true, |value| value.eq_ignore_ascii_case("true"));

        Build {
            build_number: owned(GIT_COMMIT_ID_ABBREV),
            scm_branch: if tagged { None } else { owned(GIT_BRANCH) },
            project_version: owned(PROJECT_VERSION),
            timestamp: owned(GIT_BUILD_TIME),
            dirty,
        }
    }
}

impl From<BTreeMap<String, String>> for BuildProperties {
    fn from(properties: BTreeMap<String, String>) -> Self {
        Self::new(properties)
    }
}

/// Project build information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub build_number: Option<String>,
    pub scm_branch: Option<String>,
    pub project_version: Option<String>,
    pub timestamp: Option<String>,
    /// True if the build was produced from a locally modified working copy.
    pub dirty: bool,
}
