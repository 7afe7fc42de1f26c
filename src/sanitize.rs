//! Normalizes free-form user text into identifiers usable in generated sources.

use crate::constants::FALLBACK_CLASS_NAME;
use cruet::case::pascal::to_pascal_case;

/// Turns a free-form game name into a type-name style identifier.
///
/// Everything outside ASCII letters and spaces is dropped. A blank result
/// falls back to [`FALLBACK_CLASS_NAME`]. Sentences, and words starting with a
/// lowercase letter, are converted to pascal case; anything else is assumed to
/// already be an identifier and is returned unchanged.
///
/// # Examples
/// ```
/// use jme_initializer::sanitize::sanitize_to_class_identifier;
///
/// assert_eq!(sanitize_to_class_identifier("%My Amazing Game!!"), "MyAmazingGame");
/// assert_eq!(sanitize_to_class_identifier("AlreadyCamelCase"), "AlreadyCamelCase");
/// ```
pub fn sanitize_to_class_identifier(raw: &str) -> String {
    let kept: String =
        raw.chars().filter(|c| c.is_ascii_alphabetic() || *c == ' ').collect();

    if kept.trim().is_empty() {
        return FALLBACK_CLASS_NAME.to_string();
    }

    let starts_lowercase = kept.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    if kept.contains(' ') || starts_lowercase {
        to_pascal_case(&kept)
    } else {
        kept
    }
}

/// Turns a package hint into a dotted, lowercase package path.
///
/// May return an empty string; callers pick their own fallback.
pub fn sanitize_to_package_path(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace(' ', ".");

    let mut collapsed = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c == '.' && collapsed.ends_with('.') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.strip_suffix('.').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);

    trimmed.chars().filter(|c| c.is_ascii_lowercase() || *c == '.').collect()
}

/// Converts `my.package.path` into `my/package/path`.
pub fn package_path_to_directory_path(package: &str) -> String {
    package.replace('.', "/")
}
