//! YAML writer for canonical act records.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::text::{normalize_spacing, should_wrap_text, wrap_text_default};
use crate::error::Result;
use crate::types::Act;

/// Default output directory.
const DEFAULT_OUTPUT_DIR: &str = "acts";

/// Prepare an act for serialization: spacing fixed, long bodies wrapped.
fn prepare(act: &Act) -> Act {
    let mut out = act.clone();
    for provision in &mut out.provisions {
        let normalized = normalize_spacing(&provision.content);
        provision.content = if should_wrap_text(&normalized) {
            wrap_text_default(&normalized)
        } else {
            normalized
        };
    }
    for definition in &mut out.definitions {
        definition.definition = normalize_spacing(&definition.definition);
    }
    out
}

/// Generate the YAML document for an act.
pub fn generate_yaml(act: &Act) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(&prepare(act))?;
    Ok(format!("---\n{yaml}"))
}

/// Write an act to `<output_dir>/<id>.yaml`.
///
/// # Arguments
/// * `act` - The act to serialize
/// * `output_dir` - Target directory (default: `acts/`), created if missing
///
/// # Returns
/// Path of the written file.
pub fn save_yaml(act: &Act, output_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = output_dir.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("{}.yaml", act.id));
    let yaml = generate_yaml(act)?;
    let mut file = File::create(&path)?;
    file.write_all(yaml.as_bytes())?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActStatus, Definition, Provision};

    fn sample_act() -> Act {
        Act {
            id: "test-act".to_string(),
            doc_type: "act".to_string(),
            title: "Тестовий закон".to_string(),
            title_en: "Test Law".to_string(),
            short_name: "Тест".to_string(),
            status: ActStatus::InForce,
            issued_date: Some("2003-02-01".to_string()),
            in_force_date: None,
            url: "https://zakon.rada.gov.ua/laws/show/1-IV".to_string(),
            description: "Опис".to_string(),
            provisions: vec![Provision::new("1", "Стаття 1. Перша", "Текст першої.")],
            definitions: vec![Definition {
                term: "документ".to_string(),
                definition: "матеріальний носій інформації".to_string(),
                source_provision: Some("art1".to_string()),
            }],
        }
    }

    #[test]
    fn test_generate_yaml_structure() {
        let yaml = generate_yaml(&sample_act()).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("id: test-act"));
        assert!(yaml.contains("type: act"));
        assert!(yaml.contains("status: in_force"));
        assert!(yaml.contains("provision_ref: art1"));
        assert!(yaml.contains("term: документ"));
    }

    #[test]
    fn test_generate_yaml_is_valid_yaml() {
        let yaml = generate_yaml(&sample_act()).unwrap();
        let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        assert!(parsed.get("provisions").is_some());
        assert!(parsed.get("definitions").is_some());
    }

    #[test]
    fn test_long_content_wrapped() {
        let mut act = sample_act();
        act.provisions[0].content = "слово ".repeat(60).trim().to_string();
        let yaml = generate_yaml(&act).unwrap();
        let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        let content = parsed["provisions"][0]["content"].as_str().unwrap();
        assert!(content.lines().all(|l| l.chars().count() <= 100));
    }

    #[test]
    fn test_save_yaml_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_yaml(&sample_act(), Some(dir.path())).unwrap();
        assert!(path.ends_with("test-act.yaml"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("id: test-act"));
    }
}
