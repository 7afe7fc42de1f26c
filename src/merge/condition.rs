//! Conditional directives and their evaluation
//!
//! A conditional marker is `[IF=arg]`, `[NOT=arg]` or the closing forms
//! `[/IF=arg]`, `[/NOT=arg]`. The argument is one or more condition tokens
//! joined by `|` (or `_OR_`, which is safe to use in file paths).

use crate::catalog::Library;
use crate::constants::directives::{OR, OR_ALIAS};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(/?)(IF|NOT)=([^\[\]=]*)\]").expect("conditional marker regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// `IF`: holds when any token is active.
    If,
    /// `NOT`: holds when no token is active.
    Not,
}

impl Polarity {
    pub fn keyword(&self) -> &'static str {
        match self {
            Polarity::If => "IF",
            Polarity::Not => "NOT",
        }
    }
}

/// A conditional marker found in a path or in file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'t> {
    pub polarity: Polarity,
    pub closing: bool,
    pub argument: &'t str,
    /// Byte range of the whole marker within the scanned text.
    pub range: Range<usize>,
}

impl Marker<'_> {
    /// Whether `other` closes a block opened by `self`. The argument must
    /// match exactly, including token order and OR spelling.
    pub fn is_closed_by(&self, other: &Marker<'_>) -> bool {
        !self.closing
            && other.closing
            && self.polarity == other.polarity
            && self.argument == other.argument
    }
}

/// Scans `text` left to right for conditional markers.
pub fn markers(text: &str) -> impl Iterator<Item = Marker<'_>> {
    MARKER.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let polarity = match caps.get(2)?.as_str() {
            "IF" => Polarity::If,
            _ => Polarity::Not,
        };
        Some(Marker {
            polarity,
            closing: !caps.get(1)?.as_str().is_empty(),
            argument: caps.get(3)?.as_str(),
            range: whole.range(),
        })
    })
}

/// Removes every conditional marker from `text`, keeping everything else.
pub fn strip_markers(text: &str) -> String {
    MARKER.replace_all(text, "").into_owned()
}

/// Splits a condition argument into its OR-ed tokens.
pub fn condition_tokens(argument: &str) -> impl Iterator<Item = &str> {
    argument.split(OR).flat_map(|part| part.split(OR_ALIAS))
}

/// Library keys and profile names in use for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveConditions {
    active: HashSet<String>,
}

impl ActiveConditions {
    pub fn new<S: Into<String>>(
        libraries: &[Library],
        profiles: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut active: HashSet<String> = libraries.iter().map(|l| l.key.clone()).collect();
        active.extend(profiles.into_iter().map(Into::into));
        Self { active }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.active.contains(token)
    }

    /// Evaluates a condition argument. `IF` holds when at least one token is
    /// active; `NOT` holds only when every token is absent.
    pub fn holds(&self, polarity: Polarity, argument: &str) -> bool {
        let any_active = condition_tokens(argument).any(|token| self.contains(token));
        match polarity {
            Polarity::If => any_active,
            Polarity::Not => !any_active,
        }
    }

    pub fn marker_holds(&self, marker: &Marker<'_>) -> bool {
        self.holds(marker.polarity, marker.argument)
    }
}
