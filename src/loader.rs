//! Reads template bundles from the local filesystem into memory.

use crate::config::GeneratorConfig;
use crate::constants::CONFIG_FILENAMES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::merge::Fragments;
use indexmap::IndexMap;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Template path (relative, `/` separated) → raw template bytes.
pub type TemplateTree = IndexMap<String, Vec<u8>>;

/// Fails with [`Error::TemplateDoesNotExistsError`] unless `template_root` is a directory.
pub fn ensure_template_root<P: AsRef<Path>>(template_root: P) -> Result<()> {
    let template_root = template_root.as_ref();
    if !template_root.is_dir() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_root.display().to_string(),
        });
    }
    Ok(())
}

/// Loads every template file under `template_root`, sorted by path.
///
/// Configuration files at the root, the fragment directory and paths
/// matching the configured ignore patterns are left out.
pub fn load_template_tree<P: AsRef<Path>>(
    template_root: P,
    config: &GeneratorConfig,
) -> Result<TemplateTree> {
    let template_root = template_root.as_ref();
    ensure_template_root(template_root)?;

    let ignored = config.ignore_globs()?;
    let fragments_dir = config.fragments_dir.trim_matches('/');
    let mut tree = TemplateTree::new();

    for entry in WalkDir::new(template_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let template_path = entry.path().to_slash_relative(template_root)?;
        if CONFIG_FILENAMES.contains(&template_path.as_str())
            || is_within(&template_path, fragments_dir)
        {
            continue;
        }
        if ignored.is_match(&template_path) {
            debug!("Ignoring '{template_path}' (matches ignore pattern)");
            continue;
        }

        let bytes = std::fs::read(entry.path())?;
        tree.insert(template_path, bytes);
    }

    debug!("Loaded {} templates from {}", tree.len(), template_root.display());
    Ok(tree)
}

/// Loads the fragment directory of a bundle. Fragment names are their paths
/// relative to that directory.
///
/// A bundle without a fragment directory has no fragments.
pub fn load_fragments<P: AsRef<Path>>(template_root: P, config: &GeneratorConfig) -> Result<Fragments> {
    let fragments_root = template_root.as_ref().join(config.fragments_dir.trim_matches('/'));
    let mut fragments = Fragments::new();

    if !fragments_root.is_dir() {
        debug!("No fragment directory at {}", fragments_root.display());
        return Ok(fragments);
    }

    for entry in WalkDir::new(&fragments_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.path().to_slash_relative(&fragments_root)?;
        let bytes = std::fs::read(entry.path())?;
        fragments.insert(name, String::from_utf8_lossy(&bytes));
    }

    debug!("Loaded {} fragments from {}", fragments.len(), fragments_root.display());
    Ok(fragments)
}

fn is_within(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}
