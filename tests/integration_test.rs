//! End-to-end integration tests for the harvester pipeline.
//!
//! Runs the full extraction core over fixture pages for both source
//! grammars and checks the canonical records that come out.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use rada_harvester::builder::{build_act, build_from_registry};
use rada_harvester::sources::SourceRegistry;
use rada_harvester::types::{Act, ActStatus, Grammar, SourceConfig};
use rada_harvester::yaml::generate_yaml;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn print_config() -> SourceConfig {
    SourceConfig::new("law-on-information", "2657-12", Grammar::PrintPage)
        .with_titles("Закон України «Про інформацію»", "Law of Ukraine on Information")
        .with_short_name("Про інформацію")
        .with_description("Закон про інформаційні відносини")
}

fn card_config() -> SourceConfig {
    SourceConfig::new("data-protection", "2297-17", Grammar::CardPage)
        .with_titles(
            "Закон України «Про захист персональних даних»",
            "Law of Ukraine on Personal Data Protection",
        )
        .with_short_name("Про захист персональних даних")
        .with_description("Закон про обробку персональних даних")
}

fn run_print_pipeline() -> Act {
    let html = load_fixture("information_print.html");
    build_act(&html, &print_config()).expect("print pipeline should succeed")
}

fn run_card_pipeline() -> Act {
    let html = load_fixture("data_protection_card.html");
    build_act(&html, &card_config()).expect("card pipeline should succeed")
}

#[test]
fn test_print_pipeline_sections() {
    let act = run_print_pipeline();
    let sections: Vec<&str> = act.provisions.iter().map(|p| p.section.as_str()).collect();
    assert_eq!(sections, ["1", "2", "3", "4", "4-1"]);
}

#[test]
fn test_print_pipeline_metadata() {
    let act = run_print_pipeline();

    assert_eq!(act.id, "law-on-information");
    assert_eq!(act.doc_type, "act");
    assert_eq!(act.title, "Про інформацію");
    assert_eq!(act.title_en, "Law of Ukraine on Information");
    assert_eq!(act.status, ActStatus::InForce);
    assert_eq!(act.issued_date.as_deref(), Some("1992-10-02"));
    assert_eq!(act.url, "https://zakon.rada.gov.ua/laws/show/2657-12");
}

#[test]
fn test_print_pipeline_provision_refs_unique() {
    let act = run_print_pipeline();
    let mut refs: Vec<&str> = act
        .provisions
        .iter()
        .map(|p| p.provision_ref.as_str())
        .collect();
    assert!(refs.iter().all(|r| r.starts_with("art")));
    refs.sort_unstable();
    refs.dedup();
    assert_eq!(refs.len(), act.provisions.len());
}

#[test]
fn test_print_pipeline_chapters() {
    let act = run_print_pipeline();

    let art1 = act.provisions.iter().find(|p| p.section == "1").unwrap();
    assert_eq!(art1.chapter.as_deref(), Some("Розділ I - ЗАГАЛЬНІ ПОЛОЖЕННЯ"));

    let art4 = act.provisions.iter().find(|p| p.section == "4").unwrap();
    assert_eq!(
        art4.chapter.as_deref(),
        Some("Розділ II - ДОСТУП ДО ІНФОРМАЦІЇ")
    );
}

#[test]
fn test_print_pipeline_repealed_placeholder() {
    let act = run_print_pipeline();

    let art3 = act.provisions.iter().find(|p| p.section == "3").unwrap();
    assert_eq!(
        art3.content,
        "Статтю виключено на підставі Закону № 1170-VII від 27.03.2014"
    );
}

#[test]
fn test_print_pipeline_hyphenated_section() {
    let act = run_print_pipeline();

    let art = act.provisions.iter().find(|p| p.section == "4-1").unwrap();
    assert_eq!(art.provision_ref, "art4-1");
    assert!(art.title.contains("Стаття 4-1."));
}

#[test]
fn test_print_pipeline_signature_lines_excluded() {
    let act = run_print_pipeline();
    for provision in &act.provisions {
        assert!(
            !provision.content.contains("Президент України"),
            "signature line leaked into {}",
            provision.provision_ref
        );
    }
}

#[test]
fn test_print_pipeline_definitions() {
    let act = run_print_pipeline();

    let terms: Vec<&str> = act.definitions.iter().map(|d| d.term.as_str()).collect();
    assert_eq!(terms, ["документ", "захист інформації", "інформація"]);

    let doc = &act.definitions[0];
    assert!(doc.definition.starts_with("матеріальний носій"));
    assert_eq!(doc.source_provision.as_deref(), Some("art1"));
}

#[test]
fn test_print_pipeline_is_deterministic() {
    let html = load_fixture("information_print.html");
    let first = build_act(&html, &print_config()).unwrap();
    let second = build_act(&html, &print_config()).unwrap();

    assert_eq!(first, second);
    // Byte-identical serialized output
    let json_a = serde_json::to_string(&first).unwrap();
    let json_b = serde_json::to_string(&second).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_card_pipeline_sections() {
    let act = run_card_pipeline();
    let sections: Vec<&str> = act.provisions.iter().map(|p| p.section.as_str()).collect();
    // Article 2-1 is a nested amendment sub-article; article 3 is a
    // structural-only stub
    assert_eq!(sections, ["1", "2", "4"]);
}

#[test]
fn test_card_pipeline_nested_content_not_leaked() {
    let act = run_card_pipeline();
    let art2 = act.provisions.iter().find(|p| p.section == "2").unwrap();
    assert!(!art2.content.contains("вставленої"));
}

#[test]
fn test_card_pipeline_metadata() {
    let act = run_card_pipeline();

    assert_eq!(act.title, "Про захист персональних даних");
    assert_eq!(act.status, ActStatus::Amended);
    assert_eq!(act.issued_date.as_deref(), Some("2010-06-01"));
}

#[test]
fn test_card_pipeline_chapters() {
    let act = run_card_pipeline();

    let art1 = act.provisions.iter().find(|p| p.section == "1").unwrap();
    assert_eq!(art1.chapter.as_deref(), Some("Глава 1 - ЗАГАЛЬНІ ПОЛОЖЕННЯ"));

    let art4 = act.provisions.iter().find(|p| p.section == "4").unwrap();
    assert_eq!(art4.chapter.as_deref(), Some("Глава 2 - СУБ'ЄКТИ ВІДНОСИН"));
}

#[test]
fn test_card_pipeline_definitions() {
    let act = run_card_pipeline();

    let terms: Vec<&str> = act.definitions.iter().map(|d| d.term.as_str()).collect();
    assert_eq!(terms, ["персональні дані", "володілець персональних даних"]);
    assert_eq!(
        act.definitions[0].source_provision.as_deref(),
        Some("art2")
    );
}

#[test]
fn test_card_pipeline_titles_stripped_from_bodies() {
    let act = run_card_pipeline();
    for provision in &act.provisions {
        assert!(
            !provision.content.contains(&provision.title),
            "heading duplicated in body of {}",
            provision.provision_ref
        );
    }
}

#[test]
fn test_allow_list_restricts_output() {
    let html = load_fixture("information_print.html");
    let config = print_config().with_articles(["2", "4"]);
    let act = build_act(&html, &config).unwrap();

    let sections: Vec<&str> = act.provisions.iter().map(|p| p.section.as_str()).collect();
    assert_eq!(sections, ["2", "4"]);
    // Article 1 (the definitional one) was filtered out first
    assert!(act.definitions.is_empty());
}

#[test]
fn test_build_from_registry_round_trip() {
    let html = load_fixture("information_print.html");
    let mut registry = SourceRegistry::new();
    registry.insert(print_config());

    let act = build_from_registry(&registry, "2657-12", &html).unwrap();
    assert_eq!(act.id, "law-on-information");
}

#[test]
fn test_yaml_generation() {
    let act = run_print_pipeline();
    let yaml = generate_yaml(&act).expect("Failed to generate YAML");

    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("id: law-on-information"));
    assert!(yaml.contains("type: act"));
    assert!(yaml.contains("status: in_force"));
    assert!(yaml.contains("provision_ref: art1"));
}

#[test]
fn test_yaml_validates_structure() {
    let act = run_print_pipeline();
    let yaml = generate_yaml(&act).expect("Failed to generate YAML");

    let parsed: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&yaml).expect("Generated YAML should be valid");

    assert!(parsed.get("id").is_some(), "Should have id");
    assert!(parsed.get("provisions").is_some(), "Should have provisions");
    let provisions = parsed.get("provisions").unwrap();
    assert!(provisions.is_sequence(), "provisions should be an array");
    assert!(parsed.get("definitions").is_some(), "Should have definitions");
}
