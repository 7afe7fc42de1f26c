//! Field substitution and conditional block resolution in file contents
//!
//! Content goes through two passes once fragments have been inlined:
//!
//! 1. Field substitution, line by line. A field appearing exactly once on a
//!    line and preceded only by spaces has every line of its value indented
//!    to that column, so multi-line blocks line up with the surrounding code.
//!    Fields appearing several times on a line are replaced verbatim.
//! 2. Conditional resolution. Each closing marker pairs with the innermost
//!    open marker of the same polarity and argument. A block whose condition
//!    fails is removed together with everything between its markers, even
//!    when another block's markers sit in that span. The markers of holding
//!    blocks are dropped. A line left holding nothing but removed blocks and
//!    spaces disappears entirely.
//!
//! The result always ends with exactly one line break.

use super::condition::{markers, ActiveConditions, Marker, Polarity};
use super::fields::{MergeFields, FIELD_TOKEN};
use log::warn;
use std::collections::HashMap;
use std::ops::Range;

/// Substitutes fields into every line of `content`.
pub fn substitute_fields(content: &str, fields: &MergeFields) -> String {
    content.lines().map(|line| substitute_line(line, fields)).collect::<Vec<_>>().join("\n")
}

fn substitute_line(line: &str, fields: &MergeFields) -> String {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for caps in FIELD_TOKEN.captures_iter(line) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if fields.by_name(name).is_some() {
                *occurrences.entry(name).or_default() += 1;
            }
        }
    }
    if occurrences.is_empty() {
        return line.to_string();
    }

    let mut merged = String::with_capacity(line.len());
    let mut last = 0;
    for caps in FIELD_TOKEN.captures_iter(line) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(value) = fields.by_name(name.as_str()) else {
            continue;
        };

        let prefix = &line[last..whole.start()];
        let indentable = occurrences.get(name.as_str()) == Some(&1)
            && last == 0
            && prefix.chars().all(|c| c == ' ');

        if indentable {
            merged.push_str(&indent(value, prefix));
        } else {
            merged.push_str(prefix);
            merged.push_str(value);
        }
        last = whole.end();
    }
    merged.push_str(&line[last..]);
    merged
}

/// Prefixes every line of `value` with `indentation`.
fn indent(value: &str, indentation: &str) -> String {
    value.lines().map(|l| format!("{indentation}{l}")).collect::<Vec<_>>().join("\n")
}

/// Pairs every closing marker with the innermost open marker of the same
/// polarity and argument.
///
/// Each distinct marker keeps its own stack, so blocks with different
/// arguments may interleave freely. Markers left without a partner are
/// returned in `stray`.
fn pair_markers(text: &str) -> (Vec<(Marker<'_>, Marker<'_>)>, Vec<Marker<'_>>) {
    let mut open: HashMap<(Polarity, &str), Vec<Marker<'_>>> = HashMap::new();
    let mut pairs = Vec::new();
    let mut stray = Vec::new();

    for marker in markers(text) {
        let stack = open.entry((marker.polarity, marker.argument)).or_default();
        if !marker.closing {
            stack.push(marker);
            continue;
        }
        match stack.pop() {
            Some(opening) => pairs.push((opening, marker)),
            None => {
                warn!(
                    "Dropping unmatched closing marker [/{}={}]",
                    marker.polarity.keyword(),
                    marker.argument
                );
                stray.push(marker);
            }
        }
    }

    for marker in open.into_values().flatten() {
        warn!("Dropping unclosed marker [{}={}]", marker.polarity.keyword(), marker.argument);
        stray.push(marker);
    }
    (pairs, stray)
}

/// Merges overlapping or nested ranges into their union, sorted by start.
fn union(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'t> {
    Text(&'t str),
    Removed,
}

/// Splits `text` into kept text and removed spans.
///
/// A failing block removes everything from its open marker to its close
/// marker. Markers outside those spans are cut out and the text between them
/// is kept.
fn pieces<'t>(text: &'t str, conditions: &ActiveConditions) -> Vec<Piece<'t>> {
    let (pairs, stray) = pair_markers(text);

    let removed = union(
        pairs
            .iter()
            .filter(|(open, _)| !conditions.holds(open.polarity, open.argument))
            .map(|(open, close)| open.range.start..close.range.end)
            .collect(),
    );
    let inside_removed =
        |r: &Range<usize>| removed.iter().any(|span| span.start <= r.start && r.end <= span.end);

    let mut cuts: Vec<(Range<usize>, bool)> = removed.iter().cloned().map(|r| (r, true)).collect();
    cuts.extend(
        pairs
            .iter()
            .flat_map(|(open, close)| [open, close])
            .chain(stray.iter())
            .map(|marker| marker.range.clone())
            .filter(|r| !inside_removed(r))
            .map(|r| (r, false)),
    );
    cuts.sort_by_key(|(r, _)| r.start);

    let mut pieces = Vec::new();
    let mut last = 0;
    for (range, is_removed) in cuts {
        if range.start > last {
            pieces.push(Piece::Text(&text[last..range.start]));
        }
        if is_removed {
            pieces.push(Piece::Removed);
        }
        last = range.end;
    }
    if last < text.len() {
        pieces.push(Piece::Text(&text[last..]));
    }
    pieces
}

/// Joins the pieces back into text, dropping lines that only held removed
/// blocks (and spaces).
fn collapse(pieces: &[Piece<'_>]) -> String {
    let mut lines: Vec<(String, bool)> = Vec::new();
    let mut current = String::new();
    let mut removed_on_line = false;

    for piece in pieces {
        match piece {
            Piece::Removed => removed_on_line = true,
            Piece::Text(text) => {
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push((std::mem::take(&mut current), removed_on_line));
                        removed_on_line = false;
                    }
                    current.push_str(part);
                }
            }
        }
    }
    lines.push((current, removed_on_line));

    lines
        .into_iter()
        .filter(|(line, removed)| !(*removed && line.chars().all(|c| c == ' ')))
        .map(|(line, _)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves every conditional block in `content` against `conditions`.
pub fn resolve_conditionals(content: &str, conditions: &ActiveConditions) -> String {
    collapse(&pieces(content, conditions))
}

/// Runs both content passes and normalizes the trailing line break.
pub fn merge_content(content: &str, fields: &MergeFields, conditions: &ActiveConditions) -> String {
    let substituted = substitute_fields(content, fields);
    let resolved = resolve_conditionals(&substituted, conditions);
    let mut merged = resolved.trim_end_matches(['\n', '\r']).to_string();
    merged.push('\n');
    merged
}
