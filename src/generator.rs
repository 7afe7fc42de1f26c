//! Turns a generation request and a template tree into project files.

use crate::catalog::{Catalog, Library};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::merge::{ActiveConditions, FieldInputs, FragmentSource, MergeFields, Merger};
use globset::GlobSet;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Merged output path → final file bytes, in template tree order.
pub type GeneratedFiles = IndexMap<String, Vec<u8>>;

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Game name as typed, before any sanitizing.
    pub game_name: String,
    /// Package hint; may be empty, in which case one is derived from the game name.
    pub package_name: String,
    /// Selected library keys. Keys absent from the catalog are dropped.
    pub library_keys: Vec<String>,
    /// Profile names active as condition tokens.
    pub profiles: Vec<String>,
    /// Core platform version; the configured default when `None`.
    pub jme_version: Option<String>,
    /// `group:artifact` → version.
    pub library_versions: HashMap<String, String>,
}

impl GenerationRequest {
    pub fn new(game_name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self { game_name: game_name.into(), package_name: package_name.into(), ..Self::default() }
    }

    pub fn with_libraries<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.library_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_profiles<S: Into<String>>(mut self, profiles: impl IntoIterator<Item = S>) -> Self {
        self.profiles.extend(profiles.into_iter().map(Into::into));
        self
    }

    pub fn with_jme_version(mut self, version: impl Into<String>) -> Self {
        self.jme_version = Some(version.into());
        self
    }

    pub fn with_library_versions(mut self, versions: HashMap<String, String>) -> Self {
        self.library_versions = versions;
        self
    }
}

/// What happens to one template.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Left out: a path condition does not hold, or the merged path is empty.
    Skip { source: String },
    /// Bytes passed through unchanged.
    Copy { source: String, target: String, content: Vec<u8> },
    /// Merged content.
    Write { source: String, target: String, content: Vec<u8> },
}

impl FileOperation {
    pub fn source(&self) -> &str {
        match self {
            FileOperation::Skip { source }
            | FileOperation::Copy { source, .. }
            | FileOperation::Write { source, .. } => source,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            FileOperation::Skip { .. } => None,
            FileOperation::Copy { target, .. } | FileOperation::Write { target, .. } => {
                Some(target)
            }
        }
    }

    /// A brief description of this operation for error messages.
    pub fn error_context(&self) -> String {
        match self {
            FileOperation::Skip { source } => format!("skip '{source}'"),
            FileOperation::Copy { source, target, .. } => format!("copy '{source}' -> '{target}'"),
            FileOperation::Write { source, target, .. } => {
                format!("merge '{source}' -> '{target}'")
            }
        }
    }

    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            FileOperation::Skip { source } => {
                format!("{prefix}Skipping '{source}' (conditions not met)")
            }
            FileOperation::Copy { source, target, .. } => {
                format!("{prefix}Copying '{source}' to '{target}'")
            }
            FileOperation::Write { source, target, .. } => {
                format!("{prefix}Merging '{source}' into '{target}'")
            }
        }
    }
}

/// Produces projects from template trees against a catalog snapshot.
pub struct Generator {
    config: GeneratorConfig,
    catalog: Catalog,
    blobs: GlobSet,
}

impl Generator {
    pub fn new(config: GeneratorConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        let blobs = config.blob_globs()?;
        Ok(Self { config, catalog, blobs })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Builds the merger for `request` over `fragments`.
    pub fn merger<'f>(
        &self,
        request: &GenerationRequest,
        fragments: &'f dyn FragmentSource,
    ) -> Merger<'f> {
        let libraries: Vec<Library> = self.catalog.resolve(request.library_keys.as_slice());
        let jme_version = request.jme_version.as_deref().unwrap_or(&self.config.jme_version);

        let fields = MergeFields::resolve(&FieldInputs {
            game_name: &request.game_name,
            package_name: &request.package_name,
            libraries: &libraries,
            jme_version,
            library_versions: &request.library_versions,
        });
        let conditions = ActiveConditions::new(&libraries, request.profiles.iter().cloned());

        Merger::new(fields, conditions, fragments)
            .with_template_suffix(self.config.template_suffix.as_str())
    }

    /// Decides and performs the merge for a single template.
    pub fn process(
        &self,
        merger: &Merger<'_>,
        template_path: &str,
        raw: &[u8],
    ) -> Result<FileOperation> {
        let source = template_path.to_string();
        if !merger.path_allowed(template_path) {
            return Ok(FileOperation::Skip { source });
        }

        let target = merger.merge_path(template_path);
        if target.is_empty() {
            warn!("Template '{template_path}' merges to an empty path, skipping");
            return Ok(FileOperation::Skip { source });
        }

        if self.blobs.is_match(template_path) {
            return Ok(FileOperation::Copy { source, target, content: raw.to_vec() });
        }

        let content = merger.merge_file_contents(raw)?;
        Ok(FileOperation::Write { source, target, content })
    }

    /// Generates every file of the project described by `request`.
    ///
    /// Any fragment failure aborts the whole generation.
    pub fn generate<'t, I>(
        &self,
        request: &GenerationRequest,
        template_tree: I,
        fragments: &dyn FragmentSource,
    ) -> Result<GeneratedFiles>
    where
        I: IntoIterator<Item = (&'t String, &'t Vec<u8>)>,
    {
        let merger = self.merger(request, fragments);
        let mut files = GeneratedFiles::new();

        for (template_path, raw) in template_tree {
            let operation = self.process(&merger, template_path, raw)?;
            debug!("{}", operation.get_message(false));

            match operation {
                FileOperation::Skip { .. } => {}
                FileOperation::Copy { target, content, .. }
                | FileOperation::Write { target, content, .. } => {
                    if files.contains_key(&target) {
                        warn!("'{template_path}' overwrites earlier output '{target}'");
                    }
                    files.insert(target, content);
                }
            }
        }

        info!("Generated {} files for '{}'", files.len(), request.game_name);
        Ok(files)
    }
}
