//! Chapter/division heading resolution.
//!
//! Provisions are attributed to the nearest enclosing structural
//! heading by scanning a bounded window backwards from the provision's
//! position. Headings further back than the window are not attributed;
//! that recall loss is accepted in exchange for never rescanning whole
//! documents.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::CHAPTER_LOOKBACK_WINDOW;
use crate::text::normalize_fragment;

/// Chapter ("Розділ") and division ("Глава") markers numbered with
/// Roman or Arabic numerals.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Розділ|РОЗДІЛ|Глава|ГЛАВА)\s+([IVXLC]+|[0-9]+)\b").expect("valid regex")
});

/// Maximum length of a short title span appended after the marker.
const MAX_TITLE_SPAN: usize = 80;

/// Find the byte offset `max_chars` characters before `pos`,
/// snapped to char boundaries.
fn window_start(text: &str, pos: usize, max_chars: usize) -> (usize, usize) {
    let mut end = pos.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    let mut start = end;
    for (count, (idx, _)) in text[..end].char_indices().rev().enumerate() {
        start = idx;
        if count + 1 == max_chars {
            break;
        }
    }
    (start, end)
}

/// Normalize the label word to its display form.
fn display_label(word: &str) -> &'static str {
    match word {
        "Глава" | "ГЛАВА" => "Глава",
        _ => "Розділ",
    }
}

/// Extract the short title span following a heading marker, if any.
fn title_span(after: &str) -> Option<String> {
    let mut lines = after.lines();

    let same_line = lines
        .next()
        .map(|l| l.trim_matches(|c: char| c.is_whitespace() || c == '.' || c == '-' || c == '\u{2014}'))
        .unwrap_or("");
    let candidate = if same_line.is_empty() {
        lines.next().map(str::trim).unwrap_or("")
    } else {
        same_line
    };

    if candidate.is_empty()
        || candidate.chars().count() > MAX_TITLE_SPAN
        || HEADING_MARKER.is_match(candidate)
        || candidate.starts_with("Стаття")
        || candidate.starts_with("Статті")
    {
        return None;
    }
    Some(candidate.to_string())
}

/// Resolve the nearest enclosing chapter/division heading before `pos`.
///
/// Scans a bounded backward window ([`CHAPTER_LOOKBACK_WINDOW`] chars)
/// ending at `pos`; the last marker inside the window wins, so the
/// innermost enclosing heading is returned. Returns `None` when no
/// marker falls inside the window.
///
/// # Examples
/// ```
/// use rada_harvester::chapter::resolve_heading;
///
/// let text = "Розділ II\nПРАВА ЛЮДИНИ\nСтаття 21. Усі люди є вільні.";
/// let pos = text.find("Стаття").unwrap();
/// assert_eq!(
///     resolve_heading(text, pos).as_deref(),
///     Some("Розділ II - ПРАВА ЛЮДИНИ")
/// );
/// ```
#[must_use]
pub fn resolve_heading(text: &str, pos: usize) -> Option<String> {
    let (start, end) = window_start(text, pos, CHAPTER_LOOKBACK_WINDOW);
    let window = normalize_fragment(&text[start..end]);

    let caps = HEADING_MARKER.captures_iter(&window).last()?;
    let label = display_label(caps.get(1).map_or("", |m| m.as_str()));
    let number = caps.get(2).map_or("", |m| m.as_str());

    let whole = caps.get(0)?;
    match title_span(&window[whole.end()..]) {
        Some(title) => Some(format!("{label} {number} - {title}")),
        None => Some(format!("{label} {number}")),
    }
}
