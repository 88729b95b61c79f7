//! Act assembly: metadata + provisions + definitions into the
//! canonical record.

use crate::definitions::extract_definitions;
use crate::error::{HarvestError, Result};
use crate::meta::resolve_meta;
use crate::parser::parser_for;
use crate::sources::SourceRegistry;
use crate::text::fold_hyphens;
use crate::types::{Act, SourceConfig};

/// Fixed document type tag on every canonical record.
const DOC_TYPE: &str = "act";

/// Build a canonical act from an already-fetched page.
///
/// The allow-list (when configured) is applied to provisions before
/// definition extraction, so definitions are only mined from retained
/// provisions.
pub fn build_act(html: &str, config: &SourceConfig) -> Result<Act> {
    let meta = resolve_meta(html, &config.title);

    let parser = parser_for(config.grammar);
    let mut provisions = parser.parse(html, config)?;

    if let Some(allow) = &config.articles {
        let allowed: Vec<String> = allow.iter().map(|a| fold_hyphens(a)).collect();
        provisions.retain(|p| allowed.iter().any(|a| *a == p.section));
    }

    let definitions = extract_definitions(&provisions);

    Ok(Act {
        id: config.id.clone(),
        doc_type: DOC_TYPE.to_string(),
        title_en: english_title(&meta.title, &config.title_en),
        title: meta.title,
        short_name: config.short_name.clone(),
        status: meta.status,
        issued_date: meta.issued_date,
        in_force_date: meta.in_force_date,
        url: config.canonical_url(),
        description: config.description.clone(),
        provisions,
        definitions,
    })
}

/// Generic document builder: look the act up in the caller-owned
/// registry, then parse.
///
/// The registry is an explicit value the caller constructs once and
/// threads through; this function never touches process-wide state.
pub fn build_from_registry(
    registry: &SourceRegistry,
    act_ref: &str,
    html: &str,
) -> Result<Act> {
    let config = registry
        .get(act_ref)
        .ok_or_else(|| HarvestError::UnknownSource(act_ref.to_string()))?;
    build_act(html, config)
}

/// Accept a candidate English title only when it is actually English:
/// Latin letters present, source-script letters absent.
fn english_title(candidate: &str, fallback: &str) -> String {
    let has_latin = candidate.chars().any(|c| c.is_ascii_alphabetic());
    let has_cyrillic = candidate
        .chars()
        .any(|c| ('\u{0400}'..='\u{04FF}').contains(&c));

    if has_latin && !has_cyrillic {
        candidate.to_string()
    } else {
        fallback.to_string()
    }
}
