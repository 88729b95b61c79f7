//! Markup and text normalization.
//!
//! Everything the segmenters see goes through [`normalize_fragment`]:
//! entities decoded, tags stripped, whitespace collapsed, NFC applied.
//! Normalization is total: any byte sequence resolves to some text,
//! and entities without a mapping pass through literally.

use unicode_normalization::UnicodeNormalization;

/// Resolve a named HTML entity to replacement text.
///
/// The portal uses a small, stable set; anything else falls through to
/// the numeric path or is left intact.
fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => " ",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "laquo" => "«",
        "raquo" => "»",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "shy" => "", // soft hyphen carries no text
        _ => return None,
    })
}

/// Resolve a numeric character reference body (`#169`, `#x2014`).
fn numeric_entity(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Decode HTML character entities.
///
/// Named entities use the fixed table; `&#NNN;`/`&#xHHH;` go through
/// code-point conversion. Unmapped or malformed entities are passed
/// through literally.
///
/// # Examples
/// ```
/// use rada_harvester::text::decode_entities;
///
/// assert_eq!(decode_entities("a&nbsp;&mdash;&#x62;"), "a \u{2014}b");
/// assert_eq!(decode_entities("&unknown;"), "&unknown;");
/// ```
#[must_use]
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // An entity body is short; a ';' further out means this '&' is literal.
        let semi = tail[1..].find(';').map(|i| i + 1).filter(|i| *i <= 10);
        match semi {
            Some(semi) => {
                let body = &tail[1..semi];
                if let Some(text) = named_entity(body) {
                    out.push_str(text);
                } else if let Some(ch) = numeric_entity(body) {
                    out.push(ch);
                } else {
                    out.push_str(&tail[..=semi]);
                }
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Tags that terminate a visual line.
const LINE_BREAK_TAGS: &[&str] = &[
    "br", "/p", "/div", "/li", "/tr", "/h1", "/h2", "/h3", "/h4", "/h5", "/h6", "/pre",
];

/// Check whether the tag body (text between `<` and `>`) breaks a line.
fn is_line_break_tag(tag_body: &str) -> bool {
    let name: String = tag_body
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '/')
        .collect();
    let name = name.to_ascii_lowercase();
    LINE_BREAK_TAGS.contains(&name.as_str())
}

/// Replace markup with text: line-break tags become `\n`, everything
/// else is dropped.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => {
                if is_line_break_tag(&rest[open + 1..open + close]) {
                    out.push('\n');
                }
                rest = &rest[open + close + 1..];
            }
            None => {
                // Unterminated tag: drop the remainder, it is markup.
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse runs of horizontal whitespace, trim each line, and drop
/// empty lines.
fn collapse_whitespace(s: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in s.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}

/// Normalize an HTML fragment into clean text.
///
/// Never fails: lossy-but-safe by construction.
#[must_use]
pub fn normalize_fragment(html: &str) -> String {
    let text = strip_tags(html);
    let text = decode_entities(&text);
    let text: String = text.nfc().collect();
    collapse_whitespace(&text)
}

/// Fold Unicode hyphen variants to ASCII `-`.
///
/// Covers the variants the portal mixes into section numbers:
/// hyphen (U+2010), en dash (U+2013), em dash (U+2014), and minus
/// sign (U+2212).
#[must_use]
pub fn fold_hyphens(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2010}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            other => other,
        })
        .collect()
}

/// Remove `{...}` and `[...]` editorial spans.
///
/// Greedy within each pair, no nesting — matches how the portal wraps
/// amendment annotations.
#[must_use]
pub fn strip_braces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for ch in s.chars() {
        match ch {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

/// Remove brace/bracket characters, keeping the wrapped text.
///
/// Used where annotated text must stay addressable, e.g. repealed
/// placeholders built from `[Статтю виключено ...]` headings.
#[must_use]
pub fn strip_bracket_chars(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '[' | ']'))
        .collect();
    collapse_whitespace(&kept)
}

/// Check whether a block is entirely an editorial/amendment annotation,
/// i.e. fully wrapped in braces or brackets.
#[must_use]
pub fn is_editorial_annotation(text: &str) -> bool {
    let t = text.trim();
    (t.starts_with('{') && t.ends_with('}')) || (t.starts_with('[') && t.ends_with(']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
        assert_eq!(decode_entities("&laquo;термін&raquo;"), "«термін»");
        assert_eq!(decode_entities("x&amp;y"), "x&y");
        assert_eq!(decode_entities("&lt;p&gt;"), "<p>");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("&#169;"), "©");
        assert_eq!(decode_entities("&#x2014;"), "\u{2014}");
        assert_eq!(decode_entities("&#X2014;"), "\u{2014}");
    }

    #[test]
    fn test_decode_unknown_entity_passes_through() {
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_decode_bare_ampersand() {
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("a&b"), "a&b");
        assert_eq!(decode_entities("trailing&"), "trailing&");
    }

    #[test]
    fn test_soft_hyphen_dropped() {
        assert_eq!(decode_entities("за&shy;кон"), "закон");
    }

    #[test]
    fn test_strip_tags_basic() {
        assert_eq!(normalize_fragment("<b>Стаття</b> 1"), "Стаття 1");
    }

    #[test]
    fn test_line_break_tags_become_newlines() {
        assert_eq!(normalize_fragment("a<br>b"), "a\nb");
        assert_eq!(normalize_fragment("a<br/>b"), "a\nb");
        assert_eq!(normalize_fragment("<p>a</p><p>b</p>"), "a\nb");
    }

    #[test]
    fn test_unterminated_tag_dropped() {
        assert_eq!(normalize_fragment("текст <span class="), "текст");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(normalize_fragment("a \t  b\n\n\n   c  "), "a b\nc");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_fragment("  <p>Стаття&nbsp;1.  Текст</p> ");
        let twice = normalize_fragment(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fold_hyphens() {
        assert_eq!(fold_hyphens("5\u{2013}1"), "5-1");
        assert_eq!(fold_hyphens("5\u{2014}1"), "5-1");
        assert_eq!(fold_hyphens("5\u{2010}1"), "5-1");
        assert_eq!(fold_hyphens("5\u{2212}1"), "5-1");
        assert_eq!(fold_hyphens("5-1"), "5-1");
    }

    #[test]
    fn test_strip_braces() {
        assert_eq!(
            strip_braces("Текст {Із змінами, внесеними згідно із Законом} далі"),
            "Текст далі"
        );
        assert_eq!(strip_braces("[виключено] x"), "x");
    }

    #[test]
    fn test_strip_bracket_chars_keeps_text() {
        assert_eq!(
            strip_bracket_chars("[Статтю виключено на підставі Закону]"),
            "Статтю виключено на підставі Закону"
        );
        assert_eq!(strip_bracket_chars("{а} б"), "а б");
    }

    #[test]
    fn test_is_editorial_annotation() {
        assert!(is_editorial_annotation(
            "{Із змінами, внесеними згідно із Законом № 2222-IV}"
        ));
        assert!(is_editorial_annotation("[Статтю виключено]"));
        assert!(!is_editorial_annotation("Текст {зміна} текст"));
    }
}
