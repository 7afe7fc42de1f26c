//! Template merge engine
//!
//! This module contains the directive processing components:
//! - `condition`: `[IF=...]` / `[NOT=...]` markers and their evaluation
//! - `fields`: merge fields and the values resolved for a request
//! - `path`: path filtering and output path rewriting
//! - `fragment`: `[FRAGMENT=...]` inlining
//! - `content`: field substitution and conditional block resolution

pub mod condition;
pub mod content;
pub mod fields;
pub mod fragment;
pub mod path;

pub use condition::{ActiveConditions, Polarity};
pub use fields::{FieldInputs, MergeField, MergeFields};
pub use fragment::{FragmentSource, Fragments, NoFragments};

use crate::constants::DEFAULT_TEMPLATE_SUFFIX;
use crate::error::Result;
use log::trace;

/// Merges template paths and contents for one generation request.
///
/// Built once per request from already resolved fields and conditions;
/// read-only afterwards.
pub struct Merger<'f> {
    fields: MergeFields,
    conditions: ActiveConditions,
    fragments: &'f dyn FragmentSource,
    template_suffix: String,
}

impl<'f> Merger<'f> {
    pub fn new(
        fields: MergeFields,
        conditions: ActiveConditions,
        fragments: &'f dyn FragmentSource,
    ) -> Self {
        Self {
            fields,
            conditions,
            fragments,
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
        }
    }

    pub fn with_template_suffix(mut self, template_suffix: impl Into<String>) -> Self {
        self.template_suffix = template_suffix.into();
        self
    }

    pub fn fields(&self) -> &MergeFields {
        &self.fields
    }

    pub fn conditions(&self) -> &ActiveConditions {
        &self.conditions
    }

    /// Whether the template at `template_path` belongs in the output.
    pub fn path_allowed(&self, template_path: &str) -> bool {
        path::path_allowed(template_path, &self.conditions)
    }

    /// The output path for `template_path`.
    pub fn merge_path(&self, template_path: &str) -> String {
        path::merge_path(template_path, &self.fields, &self.template_suffix)
    }

    /// Expands fragments, then substitutes fields and resolves conditionals.
    pub fn merge_content(&self, content: &str) -> Result<String> {
        let expanded = fragment::expand_fragments(content, self.fragments)?;
        trace!("Content after fragment expansion:\n{expanded}");
        Ok(content::merge_content(&expanded, &self.fields, &self.conditions))
    }

    /// Treats `contents` as UTF-8 text and merges it.
    pub fn merge_file_contents(&self, contents: &[u8]) -> Result<Vec<u8>> {
        let text = String::from_utf8_lossy(contents);
        Ok(self.merge_content(&text)?.into_bytes())
    }
}
