use crate::domain::model::{DraftEntry, MedalWeights};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DraftError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/2024_Summer_Olympics_medal_table";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// TOML-file configuration: source endpoint, scoring weights, output path,
/// and the draft assignment. The draft is static for a run; entry order
/// defines tie-break stability in the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    pub pipeline: Option<PipelineConfig>,
    pub source: SourceConfig,
    #[serde(default)]
    pub scoring: MedalWeights,
    pub load: LoadConfig,
    #[serde(default)]
    pub draft: Vec<DraftEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl Default for DraftConfig {
    /// The original family draft: seven participants, three countries each,
    /// scored against the Wikipedia 2024 Summer Olympics medal table.
    fn default() -> Self {
        let draft = [
            ("Lily", ["Peru", "Germany", "Sweden"]),
            ("Tera", ["France", "Croatia", "Egypt"]),
            ("Elise", ["Italy", "Portugal", "South Africa"]),
            ("Grace", ["China", "Mexico", "Jamaica"]),
            ("Jake", ["Japan", "New Zealand", "Slovenia"]),
            ("Will", ["Ukraine", "Turkey", "Colombia"]),
            ("Mike", ["Israel", "South Korea", "Spain"]),
        ]
        .into_iter()
        .map(|(participant, countries)| DraftEntry {
            participant: participant.to_string(),
            countries: countries.iter().map(|c| c.to_string()).collect(),
        })
        .collect();

        Self {
            pipeline: Some(PipelineConfig {
                name: "family-draft".to_string(),
                description: Some("Family Olympics medal draft".to_string()),
            }),
            source: SourceConfig {
                endpoint: DEFAULT_SOURCE_URL.to_string(),
                timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
            },
            scoring: MedalWeights::default(),
            load: LoadConfig {
                output_path: "./output".to_string(),
            },
            draft,
        }
    }
}

impl DraftConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DraftError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DraftError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Display name from the optional `[pipeline]` section.
    pub fn pipeline_name(&self) -> Option<&str> {
        self.pipeline.as_ref().map(|p| p.name.as_str())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        let mut seen = HashSet::new();
        for entry in &self.draft {
            validation::validate_non_empty_string("draft.participant", &entry.participant)?;
            if !seen.insert(entry.participant.as_str()) {
                return Err(DraftError::InvalidConfigValue {
                    field: "draft.participant".to_string(),
                    value: entry.participant.clone(),
                    reason: "Participant names must be unique".to_string(),
                });
            }
            for country in &entry.countries {
                validation::validate_non_empty_string("draft.countries", country)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for DraftConfig {
    fn source_url(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn draft(&self) -> &[DraftEntry] {
        &self.draft
    }

    fn weights(&self) -> MedalWeights {
        self.scoring
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for DraftConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[source]
endpoint = "https://example.com/medals"
timeout_seconds = 10

[scoring]
gold = 5
silver = 3
bronze = 1

[load]
output_path = "./out"

[[draft]]
participant = "Mike"
countries = ["Norway", "Sweden"]

[[draft]]
participant = "Ann"
countries = ["Japan"]
"#;

        let config = DraftConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source_url(), "https://example.com/medals");
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.weights().gold, 5);
        assert_eq!(config.draft().len(), 2);
        assert_eq!(config.draft()[0].participant, "Mike");
        assert_eq!(config.draft()[1].countries, vec!["Japan"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_section_is_optional() {
        let toml_content = r#"
[pipeline]
name = "winter-draft"
description = "Winter games edition"

[source]
endpoint = "https://example.com/medals"

[load]
output_path = "./out"
"#;

        let config = DraftConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.pipeline_name(), Some("winter-draft"));

        let without = DraftConfig::from_toml_str(
            r#"
[source]
endpoint = "https://example.com/medals"

[load]
output_path = "./out"
"#,
        )
        .unwrap();
        assert_eq!(without.pipeline_name(), None);
    }

    #[test]
    fn test_scoring_defaults_to_3_2_1() {
        let toml_content = r#"
[source]
endpoint = "https://example.com/medals"

[load]
output_path = "./out"
"#;

        let config = DraftConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.weights(), MedalWeights::default());
        assert!(config.draft().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEDAL_TEST_ENDPOINT", "https://test.medals.example");

        let toml_content = r#"
[source]
endpoint = "${MEDAL_TEST_ENDPOINT}"

[load]
output_path = "./out"
"#;

        let config = DraftConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source_url(), "https://test.medals.example");

        std::env::remove_var("MEDAL_TEST_ENDPOINT");
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let toml_content = r#"
[source]
endpoint = "not-a-url"

[load]
output_path = "./out"
"#;

        let config = DraftConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_participants_fail_validation() {
        let toml_content = r#"
[source]
endpoint = "https://example.com"

[load]
output_path = "./out"

[[draft]]
participant = "Mike"
countries = ["Norway"]

[[draft]]
participant = "Mike"
countries = ["Sweden"]
"#;

        let config = DraftConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid_family_draft() {
        let config = DraftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.draft().len(), 7);
        assert!(config.draft().iter().all(|e| e.countries.len() == 3));
        assert_eq!(config.weights(), MedalWeights::default());
        assert_eq!(config.pipeline_name(), Some("family-draft"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
endpoint = "https://example.com/medals"

[load]
output_path = "./out"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = DraftConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source_url(), "https://example.com/medals");
    }
}
