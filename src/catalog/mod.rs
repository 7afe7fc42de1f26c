//! Catalog of libraries a generation request may select from
//!
//! - `category`: grouping of libraries and exclusivity rules
//! - `library`: libraries and the dependency coordinates they contribute
//!
//! A [`Catalog`] is an immutable snapshot. Refreshing the catalog means
//! building a new value and swapping it in; in-flight requests keep the
//! snapshot they started with.

pub mod category;
pub mod library;

pub use category::LibraryCategory;
pub use library::{Artifact, Library};

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    libraries: IndexMap<String, Library>,
}

impl Catalog {
    /// Builds a snapshot, keyed by library key. Later duplicates replace
    /// earlier ones.
    pub fn from_libraries(libraries: impl IntoIterator<Item = Library>) -> Self {
        let mut by_key = IndexMap::new();
        for mut library in libraries {
            library.merge_required_platforms();
            if let Some(previous) = by_key.insert(library.key.clone(), library) {
                debug!("Library '{}' declared more than once, keeping the last", previous.key);
            }
        }
        Self { libraries: by_key }
    }

    /// Parses a JSON array of libraries.
    pub fn from_json(json: &str) -> Result<Self> {
        let libraries: Vec<Library> = serde_json::from_str(json)?;
        Ok(Self::from_libraries(libraries))
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Library> {
        self.libraries.get(key)
    }

    /// Resolves selected keys in the order given. Unknown keys are dropped.
    pub fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> Vec<Library> {
        keys.iter()
            .filter_map(|key| {
                let key = key.as_ref();
                let library = self.libraries.get(key).cloned();
                if library.is_none() {
                    warn!("Ignoring unknown library '{key}'");
                }
                library
            })
            .collect()
    }

    pub fn libraries_of_category(
        &self,
        category: LibraryCategory,
    ) -> impl Iterator<Item = &Library> {
        self.libraries.values().filter(move |l| l.category == category)
    }

    pub fn jme_libraries(&self) -> impl Iterator<Item = &Library> {
        self.libraries.values().filter(|l| l.uses_jme_version)
    }

    pub fn non_jme_libraries(&self) -> impl Iterator<Item = &Library> {
        self.libraries.values().filter(|l| !l.uses_jme_version)
    }

    /// The default library of an exclusive category.
    ///
    /// Always `None` for categories allowing several selections. More than
    /// one default in an exclusive category is a catalog defect and fails.
    pub fn default_library_in_exclusive_category(
        &self,
        category: LibraryCategory,
    ) -> Result<Option<&Library>> {
        if !category.only_one_allowed() {
            return Ok(None);
        }

        let mut defaults = self.libraries_of_category(category).filter(|l| l.default_selected);
        let first = defaults.next();
        if defaults.next().is_some() {
            return Err(Error::MultipleDefaults { category: category.to_string() });
        }
        Ok(first)
    }

    /// Checks every exclusive category for conflicting defaults.
    pub fn validate(&self) -> Result<()> {
        for category in LibraryCategory::ALL {
            self.default_library_in_exclusive_category(category)?;
        }
        Ok(())
    }
}
