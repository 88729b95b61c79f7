//! Term/definition mining.
//!
//! Runs only over provisions that look definitional, and only with
//! marker-position scans: ordinal markers and quoted terms are located
//! first, then the text between positions is sliced. No single
//! catch-all pattern runs over whole bodies.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::types::{Definition, Provision};

/// Lexical signals that a provision defines terms.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEFINITIONAL_SIGNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)визначення\s+термінів|терміни\s+вживаються|основні\s+терміни|у\s+цьому\s+(?:Законі|Кодексі)",
    )
    .expect("valid regex")
});

/// Ordinal marker opening a numbered-list item: "1)", "27)".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ORDINAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d{1,3}\)\s*").expect("valid regex"));

/// Term/definition separator: an em/en dash, or a spaced hyphen.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DASH_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\u{2014}\u{2013}]\s*|\s-\s").expect("valid regex"));

/// A term delimited by guillemets or typographic quotation marks.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUOTED_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{AB}([^\u{BB}]{1,200})\u{BB}|\u{201C}([^\u{201D}]{1,200})\u{201D}")
        .expect("valid regex")
});

/// Sentence boundary inside a quoted-term definition span.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+[А-ЯІЇЄҐA-Z]").expect("valid regex"));

/// Forward-reference marker: "(далі – …)" names a shorthand alias,
/// not a definition.
const FORWARD_REFERENCE: &str = "далі";

/// Term length bounds after quote trimming, in characters.
const TERM_LEN: std::ops::RangeInclusive<usize> = 2..=160;

/// Minimum definition length after trailing-punctuation trimming.
const MIN_DEFINITION_LEN: usize = 8;

/// Check whether a provision carries a definitional-intent signal.
fn is_definitional(provision: &Provision) -> bool {
    DEFINITIONAL_SIGNAL.is_match(&provision.title) || DEFINITIONAL_SIGNAL.is_match(&provision.content)
}

/// Trim quote punctuation and whitespace around a term.
fn trim_term(term: &str) -> String {
    term.trim_matches(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '\u{AB}' | '\u{BB}' | '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}'
            )
    })
    .to_string()
}

/// Trim trailing punctuation and whitespace off a definition.
fn trim_definition(def: &str) -> String {
    def.trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ';' | ',' | ':') || c.is_whitespace())
        .to_string()
}

/// Candidate pairs from the numbered-list form:
/// `N) term — definition text` up to the next ordinal or end of text.
fn numbered_candidates(text: &str) -> Vec<(String, String)> {
    let markers: Vec<(usize, usize)> = ORDINAL_MARKER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut out = Vec::new();
    for (i, (_, body_start)) in markers.iter().enumerate() {
        let body_end = markers
            .get(i + 1)
            .map_or(text.len(), |(next_start, _)| *next_start);
        let item = &text[*body_start..body_end];

        let Some(dash) = DASH_SEPARATOR.find(item) else {
            continue;
        };
        let term = &item[..dash.start()];
        let definition = &item[dash.end()..];
        out.push((term.to_string(), definition.to_string()));
    }
    out
}

/// Candidate pairs from the quoted-term form:
/// `«term» — definition` up to the next quoted term or a sentence
/// boundary.
fn quoted_candidates(text: &str) -> Vec<(String, String)> {
    let matches: Vec<(usize, usize, String)> = QUOTED_TERM
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).or_else(|| caps.get(2))?;
            Some((whole.start(), whole.end(), inner.as_str().to_string()))
        })
        .collect();

    let mut out = Vec::new();
    for (i, (_, quote_end, term)) in matches.iter().enumerate() {
        let after = &text[*quote_end..];
        // The separator must follow the closing quote directly.
        let Some(dash) = DASH_SEPARATOR.find(after) else {
            continue;
        };
        if !after[..dash.start()].trim().is_empty() {
            continue;
        }

        let span_end = matches
            .get(i + 1)
            .map_or(text.len(), |(next_start, _, _)| *next_start);
        let span = &text[*quote_end + dash.end()..span_end];
        let definition = match SENTENCE_BOUNDARY.find(span) {
            Some(b) => &span[..b.start()],
            None => span,
        };
        out.push((term.clone(), definition.to_string()));
    }
    out
}

/// Extract definitions from the retained provisions of one act.
///
/// Both pattern families run, in order, over every definitional
/// provision; terms are deduplicated case-insensitively across the
/// whole act, first occurrence wins.
#[must_use]
pub fn extract_definitions(provisions: &[Provision]) -> Vec<Definition> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<Definition> = Vec::new();

    for provision in provisions {
        if !is_definitional(provision) {
            continue;
        }

        let mut candidates = numbered_candidates(&provision.content);
        candidates.extend(quoted_candidates(&provision.content));

        for (raw_term, raw_definition) in candidates {
            let term = trim_term(&raw_term);
            let definition = trim_definition(&raw_definition);

            if !TERM_LEN.contains(&term.chars().count()) {
                continue;
            }
            if definition.chars().count() < MIN_DEFINITION_LEN {
                continue;
            }
            if term.to_lowercase().contains(FORWARD_REFERENCE) {
                continue;
            }

            if seen.insert(term.to_lowercase()) {
                out.push(Definition {
                    term,
                    definition,
                    source_provision: Some(provision.provision_ref.clone()),
                });
            }
        }
    }
    out
}
