//! Card-page segmentation.
//!
//! The portal's card API serves div-structured HTML where each article
//! lives in a container whose identifier encodes a chapter+article
//! compound key (`gl3_st15`). Identifiers carrying more than one
//! article segment (`gl3_st15_st15-1`) are amendment sub-articles
//! quoted inside their parent and are never emitted at top level.
//! Spans run from a container's start to the start of the next
//! container, so nested amendment markup never leaks into a parent
//! body.

use regex::Regex;
use std::sync::LazyLock;

use super::{parse_article_heading, truncate_chars, LawParser};
use crate::chapter::resolve_heading;
use crate::config::{CONTENT_TRUNCATE_LIMIT, MIN_CONTENT_LEN};
use crate::error::{HarvestError, Result};
use crate::text::{fold_hyphens, normalize_fragment};
use crate::types::{Provision, SourceConfig};

/// Article container markers: `<div id="gl<chapter>_st<article>">`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div[^>]*\bid="(gl\d+[a-z]?(?:_st[0-9][0-9a-z\-]*)+)""#)
        .expect("valid regex")
});

/// The container's own heading element.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPAN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").expect("valid regex"));

/// A discovered top-level article container.
struct ContainerMatch {
    start: usize,
    section: String,
}

/// Parser for the portal's card pages.
pub struct CardPageParser;

impl LawParser for CardPageParser {
    fn parse(&self, html: &str, config: &SourceConfig) -> Result<Vec<Provision>> {
        // Every container start bounds the previous span, nested
        // sub-articles included.
        let all_starts: Vec<usize> = CONTAINER.find_iter(html).map(|m| m.start()).collect();

        let mut containers: Vec<ContainerMatch> = Vec::new();
        for caps in CONTAINER.captures_iter(html) {
            let id = caps.get(1).map_or("", |m| m.as_str());
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            match top_level_section(id) {
                Some(section) => containers.push(ContainerMatch {
                    start: whole.start(),
                    section,
                }),
                None => {
                    tracing::debug!(id = %id, "skipping nested amendment sub-article");
                }
            }
        }

        let mut provisions: Vec<Provision> = Vec::new();
        for container in &containers {
            let end = all_starts
                .iter()
                .find(|s| **s > container.start)
                .copied()
                .unwrap_or(html.len());
            let span = &html[container.start..end];

            let (title, mut content) = split_heading(span, &container.section);

            if content.chars().count() < MIN_CONTENT_LEN {
                tracing::debug!(
                    section = %container.section,
                    "dropping structural-only container"
                );
                continue;
            }
            if truncate_chars(&mut content, CONTENT_TRUNCATE_LIMIT) {
                tracing::warn!(
                    section = %container.section,
                    limit = CONTENT_TRUNCATE_LIMIT,
                    "provision content truncated"
                );
            }

            let chapter = resolve_heading(html, container.start);
            provisions.push(
                Provision::new(container.section.clone(), title, content).with_chapter(chapter),
            );
        }

        if provisions.is_empty() {
            let body = normalize_fragment(html);
            if body.is_empty() {
                return Err(HarvestError::EmptyDocument {
                    act_ref: config.act_ref.clone(),
                });
            }
            tracing::warn!(
                act_ref = %config.act_ref,
                "no article containers recognized, emitting whole-document fallback"
            );
            provisions.push(Provision::new("0", "", body));
        }

        Ok(provisions)
    }
}

/// Extract the section number from a container identifier, rejecting
/// nested sub-articles.
///
/// Exactly one `st` segment means a top-level article; the section is
/// that segment's number with hyphens folded.
fn top_level_section(id: &str) -> Option<String> {
    let st_segments: Vec<&str> = id
        .split('_')
        .filter(|seg| {
            seg.strip_prefix("st")
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        })
        .collect();

    match st_segments.as_slice() {
        [only] => Some(fold_hyphens(&only[2..])),
        _ => None,
    }
}

/// Split a container span into heading text and normalized body.
///
/// The span's own heading element is removed before extraction so the
/// article number is not duplicated inside the body.
fn split_heading(span: &str, section: &str) -> (String, String) {
    if let Some(m) = SPAN_HEADING.captures(span) {
        if let (Some(whole), Some(inner)) = (m.get(0), m.get(1)) {
            let title = normalize_fragment(inner.as_str());
            let mut remainder = String::with_capacity(span.len());
            remainder.push_str(&span[..whole.start()]);
            remainder.push_str(&span[whole.end()..]);
            return (title, normalize_fragment(&remainder));
        }
    }

    // No heading element: fall back to a leading heading-pattern line.
    let text = normalize_fragment(span);
    let mut lines = text.lines();
    let first = lines.next().unwrap_or("");
    if parse_article_heading(first).is_some() {
        let rest: Vec<&str> = lines.collect();
        return (first.to_string(), rest.join("\n"));
    }

    (format!("Стаття {section}."), text)
}
