//! The `medquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("medquiz.toml"), SAMPLE_CONFIG)?;

    for (relative, content) in SAMPLE_CONTENT {
        let path = Path::new("content").join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_if_missing(&path, content)?;
    }

    println!("\nNext steps:");
    println!("  1. Run: medquiz tier EMT");
    println!("  2. Run: medquiz list");
    println!("  3. Run: medquiz quiz");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# medquiz configuration

default_tier = "EMT"
default_question_count = 10
data_dir = "./.medquiz"
request_timeout_secs = 30

[content]
type = "directory"
path = "./content"

# To read content from a static host instead:
# [content]
# type = "http"
# base_url = "https://example.org/medquiz"
"#;

const SAMPLE_CONTENT: [(&str, &str); 8] = [
    (
        "emt/medications.json",
        include_str!("../../content/emt/medications.json"),
    ),
    (
        "emt/scenarios.json",
        include_str!("../../content/emt/scenarios.json"),
    ),
    (
        "aemt/medications.json",
        include_str!("../../content/aemt/medications.json"),
    ),
    (
        "aemt/scenarios.json",
        include_str!("../../content/aemt/scenarios.json"),
    ),
    (
        "paramedic/medications.json",
        include_str!("../../content/paramedic/medications.json"),
    ),
    (
        "paramedic/scenarios.json",
        include_str!("../../content/paramedic/scenarios.json"),
    ),
    (
        "rn/medications.json",
        include_str!("../../content/rn/medications.json"),
    ),
    (
        "rn/scenarios.json",
        include_str!("../../content/rn/scenarios.json"),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use medquiz_content::config::parse_config;
    use medquiz_core::model::{Drug, ScenarioQuestion};
    use medquiz_core::validate::{validate_drugs, validate_scenarios};

    #[test]
    fn sample_config_parses() {
        let config = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.default_question_count, 10);
    }

    #[test]
    fn sample_content_is_clean() {
        for (name, content) in SAMPLE_CONTENT {
            let warnings = if name.ends_with("medications.json") {
                let drugs: Vec<Drug> = serde_json::from_str(content).unwrap();
                assert!(!drugs.is_empty(), "{name} is empty");
                validate_drugs(&drugs)
            } else {
                let questions: Vec<ScenarioQuestion> = serde_json::from_str(content).unwrap();
                assert!(!questions.is_empty(), "{name} is empty");
                validate_scenarios(&questions)
            };
            assert!(warnings.is_empty(), "{name}: {warnings:?}");
        }
    }
}
