//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvestError, Result};

/// Base URL of the portal.
pub const PORTAL_URL: &str = "https://zakon.rada.gov.ua";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large print pages (codes run to
/// several megabytes) and slow connections.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Minimum delay between portal requests in milliseconds.
///
/// The portal rate-limits aggressively; staying above this floor keeps
/// multi-document runs from tripping 429 responses.
pub const MIN_REQUEST_DELAY_MS: u64 = 500;

/// Maximum provision body length in characters.
///
/// Bodies longer than this are truncated, not rejected. Transitional
/// provisions of large codes occasionally blow past any reasonable
/// article size.
pub const CONTENT_TRUNCATE_LIMIT: usize = 12_000;

/// Minimum provision body length in characters.
///
/// Anything shorter after normalization is a structural-only marker
/// (bare chapter banner, anchor stub) and is dropped.
pub const MIN_CONTENT_LEN: usize = 5;

/// Backward search window for chapter/division resolution, in characters.
///
/// Headings further back than this are not attributed; callers must
/// not assume full chapter coverage on very long documents.
pub const CHAPTER_LOOKBACK_WINDOW: usize = 2_000;

/// Text wrap width for YAML output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Act reference pattern: digits/letters with `-` and `/` separators,
/// as used in portal references like `254к/96-вр` or `2341-14`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ACT_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-zА-Яа-яІіЇїЄєҐґ]+(?:[-/][0-9A-Za-zА-Яа-яІіЇїЄєҐґ]+)*$")
        .expect("valid regex")
});

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate a portal act reference.
///
/// # Examples
/// ```
/// use rada_harvester::config::validate_act_ref;
///
/// assert!(validate_act_ref("254к/96-вр").is_ok());
/// assert!(validate_act_ref("2341-14").is_ok());
/// assert!(validate_act_ref("not a ref").is_err());
/// ```
pub fn validate_act_ref(act_ref: &str) -> Result<()> {
    if ACT_REF_PATTERN.is_match(act_ref) {
        Ok(())
    } else {
        Err(HarvestError::InvalidActRef(act_ref.to_string()))
    }
}

/// Validate date format (YYYY-MM-DD).
///
/// # Examples
/// ```
/// use rada_harvester::config::validate_date;
///
/// assert!(validate_date("2025-01-01").is_ok());
/// assert!(validate_date("2025-13-01").is_err()); // Invalid month
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(HarvestError::InvalidDate(date_str.to_string()));
    }

    // Parse and validate it's a real date
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| HarvestError::InvalidDate(date_str.to_string()))?;

    Ok(())
}

/// Build the print-page URL for an act.
///
/// # Panics
/// Debug builds panic if `act_ref` doesn't match the expected format.
pub fn print_url(act_ref: &str) -> String {
    debug_assert!(
        ACT_REF_PATTERN.is_match(act_ref),
        "act_ref should be validated before calling print_url"
    );
    format!("{PORTAL_URL}/laws/show/{act_ref}/print")
}

/// Build the card-page URL for an act.
///
/// # Panics
/// Debug builds panic if `act_ref` doesn't match the expected format.
pub fn card_url(act_ref: &str) -> String {
    debug_assert!(
        ACT_REF_PATTERN.is_match(act_ref),
        "act_ref should be validated before calling card_url"
    );
    format!("{PORTAL_URL}/laws/card/{act_ref}")
}

/// Build the canonical public URL for an act, optionally anchored at a
/// provision.
pub fn act_url(act_ref: &str, provision_ref: Option<&str>) -> String {
    let mut url = format!("{PORTAL_URL}/laws/show/{act_ref}");
    if let Some(p) = provision_ref {
        url.push('#');
        url.push_str(&sanitize_fragment(p));
    }
    url
}

/// Sanitize a URL fragment identifier by removing problematic characters.
///
/// # Examples
/// ```
/// use rada_harvester::config::sanitize_fragment;
///
/// assert_eq!(sanitize_fragment("art5-1"), "art5-1");
/// assert_eq!(sanitize_fragment("art<script>"), "artscript");
/// ```
pub fn sanitize_fragment(fragment: &str) -> String {
    fragment
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.' || *c == '~')
        .collect()
}
