//! Page metadata resolution: title, issuance date, legal-force status.
//!
//! Status detection runs through an ordered table of independent
//! detector functions with first-match-wins semantics, so new cues can
//! be added without reordering unrelated cases.

use regex::Regex;
use std::sync::LazyLock;

use crate::text::normalize_fragment;
use crate::types::ActStatus;

/// First `<h1>` element on the page.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid regex"));

/// The document `<title>` element.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));

/// Trailing "issued on" suffix in page titles: "… від 28.06.1996 № 254к/96-ВР".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ISSUED_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+від\s+\d{2}\.\d{2}\.\d{4}.*$").expect("valid regex"));

/// Issuance date embedded in page-title text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ISSUED_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"від\s+(\d{2})\.(\d{2})\.(\d{4})").expect("valid regex"));

/// In-force date phrase.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IN_FORCE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"набирає\s+чинності\s+з?\s*(\d{2})\.(\d{2})\.(\d{4})").expect("valid regex")
});

/// "Valid" status badge class.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BADGE_VALID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="[^"]*\bvalid\b[^"]*""#).expect("valid regex"));

/// "Invalid"/"obsolete"/"disabled" status badge classes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BADGE_INVALID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="[^"]*\b(?:invalid|obsolete|disabled)\b[^"]*""#).expect("valid regex")
});

/// Generic status-label element.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STATUS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(?:span|div)[^>]*class="[^"]*\bstatus\b[^"]*"[^>]*>(.*?)</(?:span|div)>"#)
        .expect("valid regex")
});

/// Resolved page metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Resolved title, already fallen back to the caller-supplied one
    /// when the page gave nothing usable.
    pub title: String,

    /// Issuance date (ISO), when the page title carried one.
    pub issued_date: Option<String>,

    /// In-force date (ISO), when the page carried the phrase.
    pub in_force_date: Option<String>,

    /// Legal-force status.
    pub status: ActStatus,
}

/// Raw text of the `<title>` element, normalized.
fn page_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| normalize_fragment(m.as_str()))
        .filter(|t| !t.is_empty())
}

/// Resolve the document title.
///
/// Prefers the structured page header (`<h1>`); falls back to the page
/// `<title>` with the trailing "від DD.MM.YYYY …" suffix stripped. A
/// result containing an ellipsis is a truncated display string and is
/// discarded in favor of the caller-supplied fallback.
#[must_use]
pub fn resolve_title(html: &str, fallback: &str) -> String {
    let candidate = H1_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| normalize_fragment(m.as_str()))
        .filter(|t| !t.is_empty())
        .or_else(|| {
            page_title(html).map(|t| ISSUED_SUFFIX_RE.replace(&t, "").trim().to_string())
        })
        .filter(|t| !t.is_empty());

    match candidate {
        Some(t) if t.contains("...") || t.contains('\u{2026}') => fallback.to_string(),
        Some(t) => t,
        None => fallback.to_string(),
    }
}

/// Format captured day/month/year groups as ISO, validating the date.
fn iso_date(caps: &regex::Captures<'_>) -> Option<String> {
    let (day, month, year) = (caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str());
    let iso = format!("{year}-{month}-{day}");
    chrono::NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok()?;
    Some(iso)
}

/// Resolve the issuance date from the page-title text.
///
/// Absent or unparseable dates resolve to `None`, never an error.
#[must_use]
pub fn resolve_issued_date(html: &str) -> Option<String> {
    let title = page_title(html)?;
    ISSUED_DATE_RE.captures(&title).and_then(|c| iso_date(&c))
}

/// Resolve the in-force date from an explicit phrase on the page.
#[must_use]
pub fn resolve_in_force_date(html: &str) -> Option<String> {
    let text = normalize_fragment(html);
    IN_FORCE_DATE_RE.captures(&text).and_then(|c| iso_date(&c))
}

/// A single status detector: inspects the page, answers or abstains.
type StatusDetector = fn(&StatusCues<'_>) -> Option<ActStatus>;

/// Pre-computed inputs shared by all detectors.
struct StatusCues<'a> {
    html: &'a str,
    text_lower: String,
}

/// (a) Explicit "valid" CSS-class badge.
fn detect_valid_badge(cues: &StatusCues<'_>) -> Option<ActStatus> {
    BADGE_VALID_RE.is_match(cues.html).then_some(ActStatus::InForce)
}

/// (b) Explicit "invalid"/"obsolete"/"disabled" badge.
fn detect_invalid_badge(cues: &StatusCues<'_>) -> Option<ActStatus> {
    BADGE_INVALID_RE
        .is_match(cues.html)
        .then_some(ActStatus::Repealed)
}

/// (c) Generic status-label element, keyed on bilingual keyword text.
fn detect_status_label(cues: &StatusCues<'_>) -> Option<ActStatus> {
    let label = STATUS_LABEL_RE.captures(cues.html)?.get(1)?;
    let text = normalize_fragment(label.as_str()).to_lowercase();

    if text.contains("втратив чинність")
        || text.contains("втратила чинність")
        || text.contains("repealed")
    {
        Some(ActStatus::Repealed)
    } else if text.contains("не набрав чинності")
        || text.contains("не набрала чинності")
        || text.contains("not yet in force")
    {
        Some(ActStatus::NotYetInForce)
    } else if text.contains("із змінами") || text.contains("as amended") {
        Some(ActStatus::Amended)
    } else if text.contains("чинний") || text.contains("чинна") || text.contains("in force") {
        Some(ActStatus::InForce)
    } else {
        None
    }
}

/// (d) Page-wide keyword scan for "not yet in force" phrasing.
fn detect_not_yet_in_force(cues: &StatusCues<'_>) -> Option<ActStatus> {
    let hit = cues.text_lower.contains("не набрав чинності")
        || cues.text_lower.contains("не набрала чинності")
        || cues.text_lower.contains("not yet in force");
    hit.then_some(ActStatus::NotYetInForce)
}

/// Ordered detector chain; first match wins.
const STATUS_DETECTORS: &[StatusDetector] = &[
    detect_valid_badge,
    detect_invalid_badge,
    detect_status_label,
    detect_not_yet_in_force,
];

/// Resolve the legal-force status of the document.
///
/// Runs the detector chain in order; when every detector abstains the
/// document is taken to be in force.
#[must_use]
pub fn resolve_status(html: &str) -> ActStatus {
    let cues = StatusCues {
        html,
        text_lower: normalize_fragment(html).to_lowercase(),
    };
    STATUS_DETECTORS
        .iter()
        .find_map(|detect| detect(&cues))
        .unwrap_or(ActStatus::InForce)
}

/// Resolve all page metadata in one pass.
#[must_use]
pub fn resolve_meta(html: &str, fallback_title: &str) -> DocumentMeta {
    DocumentMeta {
        title: resolve_title(html, fallback_title),
        issued_date: resolve_issued_date(html),
        in_force_date: resolve_in_force_date(html),
        status: resolve_status(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_h1() {
        let html = "<title>Інша назва</title><h1>Конституція України</h1>";
        assert_eq!(resolve_title(html, "fallback"), "Конституція України");
    }

    #[test]
    fn test_title_falls_back_to_title_element() {
        let html = "<title>Кримінальний кодекс України від 05.04.2001 № 2341-III</title>";
        assert_eq!(
            resolve_title(html, "fallback"),
            "Кримінальний кодекс України"
        );
    }

    #[test]
    fn test_truncated_title_discarded() {
        let html = "<h1>Про внесення змін до деяких законодавчих актів…</h1>";
        assert_eq!(resolve_title(html, "Повна назва"), "Повна назва");

        let html = "<h1>Про внесення змін...</h1>";
        assert_eq!(resolve_title(html, "Повна назва"), "Повна назва");
    }

    #[test]
    fn test_missing_title_uses_fallback() {
        assert_eq!(resolve_title("<p>no title here</p>", "fb"), "fb");
    }

    #[test]
    fn test_issued_date_from_title() {
        let html = "<title>Кодекс від 05.04.2001 № 2341-III</title>";
        assert_eq!(resolve_issued_date(html).as_deref(), Some("2001-04-05"));
    }

    #[test]
    fn test_issued_date_absent() {
        assert_eq!(resolve_issued_date("<title>Без дати</title>"), None);
    }

    #[test]
    fn test_issued_date_invalid_left_unset() {
        let html = "<title>Кодекс від 31.02.2001</title>";
        assert_eq!(resolve_issued_date(html), None);
    }

    #[test]
    fn test_in_force_date() {
        let html = "<p>Закон набирає чинності з 01.09.2001</p>";
        assert_eq!(resolve_in_force_date(html).as_deref(), Some("2001-09-01"));
    }

    #[test]
    fn test_status_valid_badge() {
        let html = r#"<span class="badge valid">Чинний</span>"#;
        assert_eq!(resolve_status(html), ActStatus::InForce);
    }

    #[test]
    fn test_status_invalid_badge() {
        let html = r#"<span class="badge invalid">Втратив чинність</span>"#;
        assert_eq!(resolve_status(html), ActStatus::Repealed);
        let html = r#"<div class="obsolete">x</div>"#;
        assert_eq!(resolve_status(html), ActStatus::Repealed);
    }

    #[test]
    fn test_valid_badge_not_confused_with_invalid() {
        // "invalid" must not satisfy the \bvalid\b detector
        let html = r#"<span class="invalid">x</span>"#;
        assert_eq!(resolve_status(html), ActStatus::Repealed);
    }

    #[test]
    fn test_status_label_repealed() {
        let html = r#"<span class="status">Втратив чинність</span>"#;
        assert_eq!(resolve_status(html), ActStatus::Repealed);
    }

    #[test]
    fn test_status_label_amended() {
        let html = r#"<div class="doc-status">Чинний, із змінами</div>"#;
        // "із змінами" outranks the plain in-force keyword inside the label
        assert_eq!(resolve_status(html), ActStatus::Amended);
    }

    #[test]
    fn test_status_not_yet_in_force_keyword_scan() {
        let html = "<p>Закон не набрав чинності станом на сьогодні</p>";
        assert_eq!(resolve_status(html), ActStatus::NotYetInForce);
    }

    #[test]
    fn test_status_default_in_force() {
        assert_eq!(resolve_status("<p>звичайний текст</p>"), ActStatus::InForce);
    }

    #[test]
    fn test_badge_outranks_label() {
        let html = r#"<span class="valid">x</span><span class="status">Втратив чинність</span>"#;
        assert_eq!(resolve_status(html), ActStatus::InForce);
    }

    #[test]
    fn test_resolve_meta_combined() {
        let html = concat!(
            "<title>Закон України про інформацію від 02.10.1992 № 2657-XII</title>",
            r#"<h1>Про інформацію</h1><span class="valid">Чинний</span>"#
        );
        let meta = resolve_meta(html, "fb");
        assert_eq!(meta.title, "Про інформацію");
        assert_eq!(meta.issued_date.as_deref(), Some("1992-10-02"));
        assert_eq!(meta.status, ActStatus::InForce);
        assert_eq!(meta.in_force_date, None);
    }
}
