//! Inlining of named fragments
//!
//! `[FRAGMENT=name]` is replaced by the named fragment's text. Fragments may
//! reference other fragments; they are expanded recursively before any field
//! or conditional processing happens on the result.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[FRAGMENT=([a-zA-Z0-9./]*)\]").expect("fragment regex is valid")
});

/// Supplies fragment text by name.
pub trait FragmentSource {
    /// Returns `None` when no fragment of that name exists.
    fn fragment(&self, name: &str) -> Option<String>;
}

impl<F> FragmentSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn fragment(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// In-memory fragment store, keyed by fragment name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments(HashMap<String, String>);

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.0.insert(name.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Fragments {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FragmentSource for Fragments {
    fn fragment(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// A source with no fragments at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragments;

impl FragmentSource for NoFragments {
    fn fragment(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Expands every fragment reference in `text`.
///
/// A missing fragment is fatal, as is a fragment that ends up including
/// itself.
pub fn expand_fragments(text: &str, source: &dyn FragmentSource) -> Result<String> {
    let mut chain = Vec::new();
    expand(text, source, &mut chain)
}

fn expand(text: &str, source: &dyn FragmentSource, chain: &mut Vec<String>) -> Result<String> {
    let mut expanded = String::with_capacity(text.len());
    let mut last = 0;

    for caps in FRAGMENT.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        expanded.push_str(&text[last..whole.start()]);
        last = whole.end();

        if chain.iter().any(|n| n == name) {
            chain.push(name.to_string());
            return Err(Error::FragmentCycle { chain: chain.join(" -> ") });
        }

        let fragment = source
            .fragment(name)
            .ok_or_else(|| Error::FragmentNotFound { name: name.to_string() })?;

        chain.push(name.to_string());
        let inner = expand(&fragment, source, chain)?;
        chain.pop();

        expanded.push_str(&inner);
    }

    expanded.push_str(&text[last..]);
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(entries: &[(&str, &str)]) -> Fragments {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn text_without_fragments_is_unchanged() {
        assert_eq!(expand_fragments("plain [GAME_NAME]", &NoFragments).unwrap(), "plain [GAME_NAME]");
    }

    #[test]
    fn inlines_fragment_text() {
        let source = fragments(&[("gradle/deploy.fragment", "deploy {}")]);
        let expanded = expand_fragments("a\n[FRAGMENT=gradle/deploy.fragment]\nb", &source).unwrap();
        assert_eq!(expanded, "a\ndeploy {}\nb");
    }

    #[test]
    fn expands_nested_fragments() {
        let source = fragments(&[
            ("outer", "<[FRAGMENT=inner]>"),
            ("inner", "[IF=A]x[/IF=A]"),
        ]);
        assert_eq!(
            expand_fragments("[FRAGMENT=outer][FRAGMENT=inner]", &source).unwrap(),
            "<[IF=A]x[/IF=A]>[IF=A]x[/IF=A]"
        );
    }

    #[test]
    fn missing_fragment_is_fatal() {
        let err = expand_fragments("[FRAGMENT=absent.fragment]", &NoFragments).unwrap_err();
        assert!(matches!(err, Error::FragmentNotFound { ref name } if name == "absent.fragment"));
    }

    #[test]
    fn self_reference_is_detected() {
        let source = fragments(&[("a", "x[FRAGMENT=b]"), ("b", "y[FRAGMENT=a]")]);
        let err = expand_fragments("[FRAGMENT=a]", &source).unwrap_err();
        assert!(matches!(err, Error::FragmentCycle { ref chain } if chain == "a -> b -> a"));
    }

    #[test]
    fn closures_are_fragment_sources() {
        let source = |name: &str| (name == "greeting").then(|| "hello".to_string());
        assert_eq!(expand_fragments("[FRAGMENT=greeting]!", &source).unwrap(), "hello!");
    }

    #[test]
    fn repeated_fragment_is_not_a_cycle() {
        let source = fragments(&[("a", "1")]);
        assert_eq!(expand_fragments("[FRAGMENT=a][FRAGMENT=a]", &source).unwrap(), "11");
    }
}
