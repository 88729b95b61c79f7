//! Print-page segmentation.
//!
//! Print pages are a flat stream of paragraph blocks inside one
//! content container. Article boundaries exist only as inline heading
//! lines, so segmentation is a single forward pass holding at most one
//! open article. Editorial noise (signatures, stamps, banners) is
//! filtered out of article bodies but stays in the position stream
//! that chapter resolution scans.

use regex::Regex;
use std::sync::LazyLock;

use super::{is_repeal_heading, parse_article_heading, LawParser};
use crate::chapter::resolve_heading;
use crate::error::{HarvestError, Result};
use crate::text::{is_editorial_annotation, normalize_fragment, strip_bracket_chars};
use crate::types::{Provision, SourceConfig};

/// Content container markers, in preference order.
const CONTAINER_MARKERS: &[&str] = &[r#"id="article""#, r#"class="article""#];

/// Opening tags of the block elements that make up the stream.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:p|pre)[\s>/]").expect("valid regex"));

/// Non-article editorial lines: presidential/parliamentary signature
/// lines, amendment notices, book/chapter banner lines, city/date
/// stamps, and numbered decree stamps.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NOISE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^(?:
            Президент\ України
          | Голова\ Верховної\ Ради
          | Із\ змінами,?\ внесеними
          | КНИГА\b | Книга\b
          | РОЗДІЛ\b | Розділ\b
          | ГЛАВА\b | Глава\b
          | м\.\s*Київ
          | №\s*\S
          | N\s*\d
        )",
    )
    .expect("valid regex")
});

/// Book/chapter banner lines, a subset of the noise patterns.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BANNER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:КНИГА\b|Книга\b|РОЗДІЛ\b|Розділ\b|ГЛАВА\b|Глава\b)").expect("valid regex")
});

/// Check whether a block continues a banner: the all-caps chapter
/// title printed on the line after "Розділ N".
fn is_banner_continuation(block: &str) -> bool {
    block.chars().count() <= 100 && !block.chars().any(char::is_lowercase)
}

/// An article currently being accumulated.
struct OpenArticle {
    section: String,
    title: String,
    stream_pos: usize,
    body: Vec<String>,
}

/// Parser for the portal's print pages.
pub struct PrintPageParser;

impl LawParser for PrintPageParser {
    fn parse(&self, html: &str, config: &SourceConfig) -> Result<Vec<Provision>> {
        let container = find_container(html).ok_or_else(|| HarvestError::ContentRoot {
            act_ref: config.act_ref.clone(),
        })?;

        let mut provisions: Vec<Provision> = Vec::new();
        let mut current: Option<OpenArticle> = None;
        // Running normalized text of every block, headings and noise
        // included; chapter markers are resolved against it.
        let mut stream = String::new();

        let mut after_banner = false;
        for block in block_texts(container) {
            let pos = stream.len();
            stream.push_str(&block);
            stream.push('\n');

            if is_editorial_annotation(&block) || NOISE_LINE.is_match(&block) {
                after_banner = BANNER_LINE.is_match(&block);
                continue;
            }
            if after_banner && is_banner_continuation(&block) {
                after_banner = false;
                continue;
            }
            after_banner = false;

            let mut lines = block.lines();
            let first = lines.next().unwrap_or("");

            if let Some(heading) = parse_article_heading(first) {
                finalize(&mut provisions, current.take(), &stream);
                let mut open = OpenArticle {
                    section: heading.section,
                    title: heading.title,
                    stream_pos: pos,
                    body: Vec::new(),
                };
                // A block can carry the heading and the first body
                // lines together.
                let rest: Vec<&str> = lines.collect();
                if !rest.is_empty() {
                    open.body.push(rest.join("\n"));
                }
                current = Some(open);
            } else if let Some(open) = current.as_mut() {
                open.body.push(block);
            }
        }
        finalize(&mut provisions, current.take(), &stream);

        if provisions.is_empty() {
            let body = stream.trim().to_string();
            if body.is_empty() {
                return Err(HarvestError::EmptyDocument {
                    act_ref: config.act_ref.clone(),
                });
            }
            tracing::warn!(
                act_ref = %config.act_ref,
                "no article headings recognized, emitting whole-document fallback"
            );
            provisions.push(Provision::new("0", "", body));
        }

        Ok(provisions)
    }
}

/// Locate the content container and return everything from its opening
/// tag to the end of the document body.
///
/// Print pages put all legal text after the container marker; matching
/// the closing `</div>` is not reliable on this markup, so the slice
/// runs to `</body>` (or end of input).
fn find_container(html: &str) -> Option<&str> {
    let marker_pos = CONTAINER_MARKERS.iter().find_map(|m| html.find(m))?;
    let start = html[marker_pos..].find('>').map(|i| marker_pos + i + 1)?;
    let end = html[start..]
        .find("</body>")
        .map_or(html.len(), |i| start + i);
    Some(&html[start..end])
}

/// Iterate the normalized text of each paragraph/preformatted block in
/// document order.
///
/// A block's raw span runs from its opening tag to the start of the
/// next block (closing tags disappear in normalization), so unclosed
/// paragraphs — common on print pages — cost nothing.
fn block_texts(container: &str) -> impl Iterator<Item = String> + '_ {
    let starts: Vec<usize> = BLOCK_OPEN.find_iter(container).map(|m| m.start()).collect();
    let ends: Vec<usize> = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(container.len()))
        .collect();

    starts
        .into_iter()
        .zip(ends)
        .filter_map(move |(start, end)| {
            let open_end = container[start..end].find('>')? + start + 1;
            let text = normalize_fragment(&container[open_end..end]);
            (!text.is_empty()).then_some(text)
        })
}

/// Close out an open article into a provision.
///
/// Empty bodies survive only for explicitly repealed headings, which
/// get the bracket-stripped heading remainder as placeholder content;
/// any other empty article is a structural marker and is dropped.
fn finalize(provisions: &mut Vec<Provision>, open: Option<OpenArticle>, stream: &str) {
    let Some(open) = open else { return };

    let mut content = open.body.join("\n").trim().to_string();

    if content.is_empty() {
        if is_repeal_heading(&open.title) {
            content = repeal_placeholder(&open.title);
        }
        if content.is_empty() {
            tracing::debug!(section = %open.section, "dropping empty provision");
            return;
        }
    }

    let chapter = resolve_heading(stream, open.stream_pos);
    provisions.push(Provision::new(open.section, open.title, content).with_chapter(chapter));
}

/// Placeholder content for a repealed article: the heading remainder
/// after the section label, bracket characters removed.
fn repeal_placeholder(title: &str) -> String {
    let remainder = title
        .split_once('.')
        .map(|(_, rest)| rest)
        .unwrap_or(title);
    let stripped = strip_bracket_chars(remainder);
    if stripped.is_empty() {
        strip_bracket_chars(title)
    } else {
        stripped
    }
}
