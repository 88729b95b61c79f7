//! Text wrapping and spacing fixes for YAML output.

use regex::Regex;
use std::sync::LazyLock;
use textwrap::{fill, Options};

use crate::config::TEXT_WRAP_WIDTH;

/// Missing space after a comma between letters ("слово,далі"), but not
/// inside numbers ("1,5").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MISSING_SPACE_AFTER_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{L}]),([\p{L}])").expect("valid regex")
});

/// Fix common typographical issues the portal leaves in article text.
#[must_use]
pub fn normalize_spacing(text: &str) -> String {
    // Loop until stable; overlapping runs like "а,б,в" need two passes
    let mut result = text.to_string();
    loop {
        let replaced = MISSING_SPACE_AFTER_COMMA
            .replace_all(&result, "$1, $2")
            .to_string();
        if replaced == result {
            break;
        }
        result = replaced;
    }
    result
}

/// Wrap text at the given width, preserving line structure.
///
/// Lines carrying URLs are left unwrapped so they stay clickable.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width);
    text.lines()
        .map(|line| {
            if line.contains("http://") || line.contains("https://") {
                line.to_string()
            } else {
                fill(line, &options)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check whether text is long enough to benefit from wrapping.
#[must_use]
pub fn should_wrap_text(text: &str) -> bool {
    text.lines().any(|l| l.len() > TEXT_WRAP_WIDTH)
}

/// Wrap text with the default width.
#[must_use]
pub fn wrap_text_default(text: &str) -> String {
    wrap_text(text, TEXT_WRAP_WIDTH)
}
