//! Curated source registry.
//!
//! Maps normalized portal references to per-document configuration.
//! The registry is an explicit value: construct it once (usually via
//! [`SourceRegistry::builtin`]) and pass it by reference wherever a
//! lookup is needed. Nothing here is process-global, so concurrent
//! callers share one registry safely.

use std::collections::HashMap;

use crate::text::fold_hyphens;
use crate::types::{Grammar, SourceConfig};

/// Read-only lookup from normalized act reference to configuration.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    entries: HashMap<String, SourceConfig>,
}

/// Normalize a reference for lookup: case-folded, hyphens folded.
fn normalize_ref(act_ref: &str) -> String {
    fold_hyphens(act_ref.trim()).to_lowercase()
}

impl SourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry of curated sources.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for config in builtin_sources() {
            registry.insert(config);
        }
        registry
    }

    /// Insert a configuration, keyed by its normalized reference.
    pub fn insert(&mut self, config: SourceConfig) {
        self.entries.insert(normalize_ref(&config.act_ref), config);
    }

    /// Look up a configuration by (raw) act reference.
    #[must_use]
    pub fn get(&self, act_ref: &str) -> Option<&SourceConfig> {
        self.entries.get(&normalize_ref(act_ref))
    }

    /// Iterate all configurations, ordered by act identifier.
    pub fn iter(&self) -> impl Iterator<Item = &SourceConfig> {
        let mut configs: Vec<&SourceConfig> = self.entries.values().collect();
        configs.sort_by(|a, b| a.id.cmp(&b.id));
        configs.into_iter()
    }

    /// Number of curated sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The curated document set.
fn builtin_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("constitution", "254к/96-вр", Grammar::PrintPage)
            .with_titles("Конституція України", "Constitution of Ukraine")
            .with_short_name("Конституція")
            .with_description("Основний Закон України"),
        SourceConfig::new("criminal-code", "2341-14", Grammar::PrintPage)
            .with_titles("Кримінальний кодекс України", "Criminal Code of Ukraine")
            .with_short_name("ККУ")
            .with_description("Кодекс про кримінальну відповідальність"),
        SourceConfig::new("civil-code", "435-15", Grammar::PrintPage)
            .with_titles("Цивільний кодекс України", "Civil Code of Ukraine")
            .with_short_name("ЦКУ")
            .with_description("Кодекс про цивільні відносини"),
        SourceConfig::new("labor-code", "322-08", Grammar::PrintPage)
            .with_titles("Кодекс законів про працю України", "Labor Code of Ukraine")
            .with_short_name("КЗпП")
            .with_description("Кодекс про трудові відносини"),
        SourceConfig::new("law-on-information", "2657-12", Grammar::PrintPage)
            .with_titles("Закон України «Про інформацію»", "Law of Ukraine on Information")
            .with_short_name("Про інформацію")
            .with_description("Закон про інформаційні відносини"),
        SourceConfig::new("data-protection", "2297-17", Grammar::CardPage)
            .with_titles(
                "Закон України «Про захист персональних даних»",
                "Law of Ukraine on Personal Data Protection",
            )
            .with_short_name("Про захист персональних даних")
            .with_description("Закон про обробку персональних даних"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_nonempty() {
        let registry = SourceRegistry::builtin();
        assert!(!registry.is_empty());
        assert!(registry.len() >= 6);
    }

    #[test]
    fn test_lookup_by_reference() {
        let registry = SourceRegistry::builtin();
        let config = registry.get("2341-14").unwrap();
        assert_eq!(config.id, "criminal-code");
    }

    #[test]
    fn test_lookup_normalizes_case_and_hyphens() {
        let registry = SourceRegistry::builtin();
        assert!(registry.get("254К/96-ВР").is_some());
        assert!(registry.get("2341\u{2013}14").is_some());
        assert!(registry.get(" 2341-14 ").is_some());
    }

    #[test]
    fn test_unknown_reference() {
        let registry = SourceRegistry::builtin();
        assert!(registry.get("0000-00").is_none());
    }

    #[test]
    fn test_iter_ordered_by_id() {
        let registry = SourceRegistry::builtin();
        let ids: Vec<&str> = registry.iter().map(|c| c.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = SourceRegistry::new();
        registry.insert(SourceConfig::new("x", "1-а", Grammar::PrintPage));
        assert!(registry.get("1-А").is_some());
        assert_eq!(registry.len(), 1);
    }
}
