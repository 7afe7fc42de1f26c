//! Selectable libraries and their dependency coordinates

use super::category::LibraryCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single dependency coordinate contributed by a library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    /// Overrides any looked up version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_version: Option<String>,
    /// Used when the version map has no entry for this coordinate.
    #[serde(default)]
    pub fallback_version: String,
}

impl Artifact {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self { group_id: group_id.into(), artifact_id: artifact_id.into(), ..Default::default() }
    }

    pub fn with_pin_version(mut self, version: impl Into<String>) -> Self {
        self.pin_version = Some(version.into());
        self
    }

    pub fn with_fallback_version(mut self, version: impl Into<String>) -> Self {
        self.fallback_version = version.into();
        self
    }

    /// `group:artifact`, the key used by the version map.
    pub fn coordinate(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Picks the pinned version, else the version map entry, else the fallback.
    pub fn resolve_version<'a>(&'a self, versions: &'a HashMap<String, String>) -> &'a str {
        if let Some(pinned) = &self.pin_version {
            return pinned;
        }
        versions.get(&self.coordinate()).map(String::as_str).unwrap_or(self.fallback_version.as_str())
    }
}

/// An optional module the user may add to the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub key: String,
    pub display_name: String,
    pub category: LibraryCategory,
    #[serde(default)]
    pub description_text: String,
    #[serde(default)]
    pub default_selected: bool,
    /// Part of the core versioned platform: declarations omit an explicit
    /// version and defer to the pinned platform version.
    #[serde(default)]
    pub uses_jme_version: bool,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub specialised_to_platforms: Vec<String>,
    #[serde(default)]
    pub required_platforms: Vec<String>,
    #[serde(default)]
    pub additional_maven_repos: Vec<String>,
}

impl Library {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        category: LibraryCategory,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            category,
            description_text: String::new(),
            default_selected: false,
            uses_jme_version: false,
            artifacts: Vec::new(),
            specialised_to_platforms: Vec::new(),
            required_platforms: Vec::new(),
            additional_maven_repos: Vec::new(),
        }
    }

    pub fn with_artifacts(mut self, artifacts: Vec<Artifact>) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn with_platforms(mut self, platforms: &[&str]) -> Self {
        self.specialised_to_platforms = platforms.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_repositories(mut self, repositories: &[&str]) -> Self {
        self.additional_maven_repos = repositories.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn using_jme_version(mut self) -> Self {
        self.uses_jme_version = true;
        self
    }

    pub fn selected_by_default(mut self) -> Self {
        self.default_selected = true;
        self
    }

    /// Whether this library's declarations only apply to `platform`.
    pub fn is_specialised_to(&self, platform: &str) -> bool {
        self.specialised_to_platforms.iter().any(|p| p == platform)
    }

    pub fn is_specialised(&self) -> bool {
        !self.specialised_to_platforms.is_empty()
    }

    pub fn is_platform(&self) -> bool {
        self.category == LibraryCategory::JmePlatform
    }

    /// Folds required platforms into the specialisation tags.
    ///
    /// Catalog feeds declare platform restrictions as `requiredPlatforms`;
    /// for dependency placement both lists mean the same thing.
    pub(crate) fn merge_required_platforms(&mut self) {
        for platform in &self.required_platforms {
            if !self.specialised_to_platforms.contains(platform) {
                self.specialised_to_platforms.push(platform.clone());
            }
        }
    }
}
