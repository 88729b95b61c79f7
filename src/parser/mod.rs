//! Provision segmentation.
//!
//! The portal publishes the same legal content through two very
//! different HTML shapes: "print" pages (a flat paragraph stream with
//! inline article headings) and card pages (div containers keyed by
//! chapter+article). Both live behind [`LawParser`]; heading
//! recognition and normalization are shared here.

mod card_page;
mod print_page;

pub use card_page::CardPageParser;
pub use print_page::PrintPageParser;

use regex::Regex;
use std::sync::LazyLock;

use crate::error::Result;
use crate::text::fold_hyphens;
use crate::types::{Grammar, Provision, SourceConfig};

/// A segmentation grammar: raw page HTML in, ordered provisions out.
pub trait LawParser {
    /// Segment a complete page into provisions.
    fn parse(&self, html: &str, config: &SourceConfig) -> Result<Vec<Provision>>;
}

/// Select the parser for a grammar.
#[must_use]
pub fn parser_for(grammar: Grammar) -> &'static dyn LawParser {
    match grammar {
        Grammar::PrintPage => &PrintPageParser,
        Grammar::CardPage => &CardPageParser,
    }
}

/// Article heading: label, number (optionally suffixed or hyphenated),
/// optional spaced range ("Статті 6 - 8"), rest of the line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Статт[яі]\s+(\d+[а-яіїєґ]?(?:-\d+[а-яіїєґ]?)*)(?:\s+-\s+(\d+[а-яіїєґ]?))?\s*\.?",
    )
    .expect("valid regex")
});

/// Repeal markers in headings ("struck out" / "lost force").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REPEAL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)виключен[оа]|втратил[аи]\s+чинність|втратив\s+чинність")
        .expect("valid regex")
});

/// A recognized article heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeadingMatch {
    /// Normalized section number ("5", "5-1", "6-8").
    pub section: String,

    /// The full heading line, hyphens folded.
    pub title: String,
}

/// Try to read the first line of a normalized block as an article
/// heading.
///
/// Hyphen variants are folded before matching, so both `section` and
/// the derived `provision_ref` come out ASCII-hyphenated; a spaced
/// label range ("Статті 6 - 8") normalizes to "6-8".
pub(crate) fn parse_article_heading(line: &str) -> Option<HeadingMatch> {
    let folded = fold_hyphens(line.trim());
    let caps = ARTICLE_HEADING.captures(&folded)?;

    let mut section = caps.get(1)?.as_str().to_string();
    if let Some(range_end) = caps.get(2) {
        section.push('-');
        section.push_str(range_end.as_str());
    }

    Some(HeadingMatch {
        section,
        title: folded,
    })
}

/// Check whether a heading carries an explicit repeal marker.
pub(crate) fn is_repeal_heading(title: &str) -> bool {
    REPEAL_MARKER.is_match(title)
}

/// Truncate a string to at most `max_chars` characters, in place.
pub(crate) fn truncate_chars(s: &mut String, max_chars: usize) -> bool {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            s.truncate(idx);
            true
        }
        None => false,
    }
}
