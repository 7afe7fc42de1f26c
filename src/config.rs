//! Template bundle configuration

use crate::constants::{
    CONFIG_FILENAMES, DEFAULT_BLOB_PATTERNS, DEFAULT_FRAGMENTS_DIR, DEFAULT_JME_VERSION,
    DEFAULT_TEMPLATE_SUFFIX,
};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Settings a template bundle may declare next to its templates.
///
/// Every field is optional in the file; a bundle without any configuration
/// file gets [`GeneratorConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default = "get_default_template_suffix")]
    pub template_suffix: String,
    /// Template paths copied byte for byte.
    #[serde(default = "get_default_blob_patterns")]
    pub blob_patterns: Vec<String>,
    #[serde(default = "get_default_jme_version")]
    pub jme_version: String,
    #[serde(default = "get_default_fragments_dir")]
    pub fragments_dir: String,
    /// Extra paths left out of the template tree.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_suffix: get_default_template_suffix(),
            blob_patterns: get_default_blob_patterns(),
            jme_version: get_default_jme_version(),
            fragments_dir: get_default_fragments_dir(),
            ignore: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Loads the first configuration file found in `template_root`.
    pub fn load<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let template_root = template_root.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = template_root.join(config_file_name);

            if config_file_path.exists() {
                debug!("Loading configuration from {}", config_file_path.display());
                let content = std::fs::read_to_string(&config_file_path)?;
                return Self::parse(config_file_name, &content);
            }
        }

        debug!("No configuration file in {}, using defaults", template_root.display());
        Ok(Self::default())
    }

    /// Parses `content` according to the extension of `file_name`.
    pub fn parse(file_name: &str, content: &str) -> Result<Self> {
        let config: Self = if file_name.ends_with(".json") {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.template_suffix.starts_with('.') || self.template_suffix.len() < 2 {
            return Err(Error::ConfigValidation(
                "template_suffix must start with '.' and have at least 1 character after it"
                    .into(),
            ));
        }
        if self.fragments_dir.trim_matches('/').is_empty() {
            return Err(Error::ConfigValidation("fragments_dir must not be empty".into()));
        }
        self.blob_globs()?;
        self.ignore_globs()?;
        Ok(())
    }

    pub fn blob_globs(&self) -> Result<GlobSet> {
        build_globset(&self.blob_patterns)
    }

    pub fn ignore_globs(&self) -> Result<GlobSet> {
        build_globset(&self.ignore)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn get_default_template_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}

fn get_default_blob_patterns() -> Vec<String> {
    DEFAULT_BLOB_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn get_default_jme_version() -> String {
    DEFAULT_JME_VERSION.to_string()
}

fn get_default_fragments_dir() -> String {
    DEFAULT_FRAGMENTS_DIR.to_string()
}
