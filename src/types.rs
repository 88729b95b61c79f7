//! Core data types for the harvester.
//!
//! These types represent one legislative act and its components in the
//! canonical output shape consumed by the storage layer.

use serde::{Deserialize, Serialize};

use crate::config::act_url;

/// Legal-force status of an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActStatus {
    /// The act is in force.
    InForce,

    /// In force with amendments applied.
    Amended,

    /// Repealed / lost force.
    Repealed,

    /// Adopted but not yet in force.
    NotYetInForce,
}

impl ActStatus {
    /// Get the string value for serialized output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InForce => "in_force",
            Self::Amended => "amended",
            Self::Repealed => "repealed",
            Self::NotYetInForce => "not_yet_in_force",
        }
    }
}

/// One addressable article of an act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    /// ASCII reference token derived from the section number (e.g., "art5").
    pub provision_ref: String,

    /// Enclosing chapter/division label, when one was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,

    /// Section number as it appears in source, hyphens normalized (e.g., "5-1").
    pub section: String,

    /// Heading text, usually including the label prefix.
    pub title: String,

    /// Normalized body text.
    pub content: String,
}

impl Provision {
    /// Create a new provision, deriving `provision_ref` from the section.
    #[must_use]
    pub fn new(
        section: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let section = section.into();
        Self {
            provision_ref: provision_ref_for(&section),
            chapter: None,
            section,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Attach a chapter label.
    #[must_use]
    pub fn with_chapter(mut self, chapter: Option<String>) -> Self {
        self.chapter = chapter;
        self
    }
}

/// Derive the ASCII reference token for a section number.
///
/// Cyrillic letter suffixes that the portal occasionally uses in
/// section numbers ("5а") are transliterated; any other non-ASCII
/// character is dropped.
///
/// # Examples
/// ```
/// use rada_harvester::types::provision_ref_for;
///
/// assert_eq!(provision_ref_for("5"), "art5");
/// assert_eq!(provision_ref_for("5-1"), "art5-1");
/// assert_eq!(provision_ref_for("5а"), "art5a");
/// ```
#[must_use]
pub fn provision_ref_for(section: &str) -> String {
    let mut out = String::with_capacity(section.len() + 3);
    out.push_str("art");
    for ch in section.to_lowercase().chars() {
        match ch {
            'a'..='z' | '0'..='9' | '-' | '.' => out.push(ch),
            'а' => out.push('a'),
            'б' => out.push('b'),
            'в' => out.push('v'),
            'г' => out.push('h'),
            'ґ' => out.push('g'),
            'д' => out.push('d'),
            'е' => out.push('e'),
            _ => {}
        }
    }
    out
}

/// A term/definition pair mined from a provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// The defined term.
    pub term: String,

    /// The statutory meaning.
    pub definition: String,

    /// Reference of the provision that states the definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_provision: Option<String>,
}

/// Complete act with metadata, provisions, and definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Act {
    /// Stable identifier, unique within a corpus (e.g., "criminal-code").
    pub id: String,

    /// Fixed document type tag.
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Title in the source language.
    pub title: String,

    /// English title.
    pub title_en: String,

    /// Short display name.
    pub short_name: String,

    /// Legal-force status.
    pub status: ActStatus,

    /// Issuance date (ISO YYYY-MM-DD), when resolvable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<String>,

    /// In-force date (ISO YYYY-MM-DD), when resolvable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_force_date: Option<String>,

    /// Canonical portal URL.
    pub url: String,

    /// Free-text description.
    pub description: String,

    /// Provisions in source document order.
    pub provisions: Vec<Provision>,

    /// Extracted definitions, deduplicated per act.
    pub definitions: Vec<Definition>,
}

/// Which source grammar a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// "Print page" portal output: inline heading markers in a
    /// paragraph stream.
    PrintPage,

    /// API-served card pages: div containers keyed by chapter+article.
    CardPage,
}

/// Caller-supplied per-document configuration.
///
/// Read-only input to a parse call. Fallback strings are used only
/// when extraction fails to find better data on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable act identifier.
    pub id: String,

    /// Portal reference used to build source URLs (e.g., "254к/96-вр").
    pub act_ref: String,

    /// Fallback title (source language).
    pub title: String,

    /// Fallback English title.
    pub title_en: String,

    /// Short display name.
    pub short_name: String,

    /// Free-text description.
    pub description: String,

    /// Optional allow-list of section numbers to retain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<String>>,

    /// Source grammar for this document.
    pub grammar: Grammar,
}

impl SourceConfig {
    /// Create a config with required fields; fallbacks default to empty.
    #[must_use]
    pub fn new(id: impl Into<String>, act_ref: impl Into<String>, grammar: Grammar) -> Self {
        Self {
            id: id.into(),
            act_ref: act_ref.into(),
            title: String::new(),
            title_en: String::new(),
            short_name: String::new(),
            description: String::new(),
            articles: None,
            grammar,
        }
    }

    /// Set the fallback titles.
    #[must_use]
    pub fn with_titles(mut self, title: impl Into<String>, title_en: impl Into<String>) -> Self {
        self.title = title.into();
        self.title_en = title_en.into();
        self
    }

    /// Set the short display name.
    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restrict output to the given section numbers.
    #[must_use]
    pub fn with_articles(mut self, articles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.articles = Some(articles.into_iter().map(Into::into).collect());
        self
    }

    /// Canonical public URL for this act.
    #[must_use]
    pub fn canonical_url(&self) -> String {
        act_url(&self.act_ref, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_act_status_as_str() {
        assert_eq!(ActStatus::InForce.as_str(), "in_force");
        assert_eq!(ActStatus::Repealed.as_str(), "repealed");
        assert_eq!(ActStatus::NotYetInForce.as_str(), "not_yet_in_force");
    }

    #[test]
    fn test_act_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ActStatus::InForce).unwrap(),
            "\"in_force\""
        );
        assert_eq!(
            serde_json::to_string(&ActStatus::NotYetInForce).unwrap(),
            "\"not_yet_in_force\""
        );
    }

    #[test]
    fn test_provision_ref_for_plain() {
        assert_eq!(provision_ref_for("5"), "art5");
        assert_eq!(provision_ref_for("148"), "art148");
    }

    #[test]
    fn test_provision_ref_for_hyphenated() {
        assert_eq!(provision_ref_for("5-1"), "art5-1");
    }

    #[test]
    fn test_provision_ref_for_cyrillic_suffix() {
        assert_eq!(provision_ref_for("5а"), "art5a");
        assert_eq!(provision_ref_for("12б"), "art12b");
    }

    #[test]
    fn test_provision_ref_is_ascii() {
        assert!(provision_ref_for("5-1я").is_ascii());
        assert!(provision_ref_for("№7").is_ascii());
    }

    #[test]
    fn test_provision_new_derives_ref() {
        let p = Provision::new("5-1", "Стаття 5-1. Щось", "Текст");
        assert_eq!(p.provision_ref, "art5-1");
        assert_eq!(p.section, "5-1");
        assert!(p.chapter.is_none());
    }

    #[test]
    fn test_source_config_builder() {
        let config = SourceConfig::new("constitution", "254к/96-вр", Grammar::PrintPage)
            .with_titles("Конституція України", "Constitution of Ukraine")
            .with_short_name("Конституція")
            .with_articles(["1", "5"]);

        assert_eq!(config.id, "constitution");
        assert_eq!(config.articles.as_deref(), Some(&["1".to_string(), "5".to_string()][..]));
        assert_eq!(
            config.canonical_url(),
            "https://zakon.rada.gov.ua/laws/show/254к/96-вр"
        );
    }

    #[test]
    fn test_provision_serialization_skips_empty_chapter() {
        let p = Provision::new("1", "Стаття 1.", "Текст");
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("chapter"));
    }
}
