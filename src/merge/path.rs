//! Template path filtering and rewriting

use super::condition::{markers, strip_markers, ActiveConditions};
use super::fields::MergeFields;
use crate::constants::directives::DOT;

/// A path survives only if every conditional marker in it holds.
///
/// Path markers have no closing counterpart; each one gates the whole path.
pub fn path_allowed(template_path: &str, conditions: &ActiveConditions) -> bool {
    markers(template_path).filter(|m| !m.closing).all(|m| conditions.marker_holds(&m))
}

/// Rewrites a template path into its output path.
///
/// Fields are substituted, conditional markers dropped (filtering has
/// already happened), empty segments collapsed, the template suffix and a
/// leading separator removed, and `[DOT]` turned into `.`.
pub fn merge_path(template_path: &str, fields: &MergeFields, template_suffix: &str) -> String {
    let path = fields.replace_all(template_path);
    let path = collapse_separators(&strip_markers(&path));
    let path = path.strip_suffix(template_suffix).unwrap_or(&path);
    let path = path.strip_prefix('/').unwrap_or(path);
    path.replace(DOT, ".")
}

fn collapse_separators(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}
