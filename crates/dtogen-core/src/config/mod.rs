mod output;
mod source;

pub use output::{DiscoveryConfig, OutputConfig, DEFAULT_BARREL_FILE};
pub use source::SourceConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DtogenError, Result};

/// Root configuration, usually read from `dtogen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DtogenConfig {
    /// Metadata source.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output location.
    #[serde(default)]
    pub output: OutputConfig,

    /// Discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl DtogenConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DtogenError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| DtogenError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Check that a generation run can start from this configuration.
    pub fn validate(&self) -> Result<()> {
        match (&self.source.schema, &self.source.src_dir) {
            (None, None) => {
                return Err(DtogenError::Config(
                    "No metadata source: set source.schema or source.src_dir".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(DtogenError::Config(
                    "source.schema and source.src_dir are mutually exclusive".to_string(),
                ))
            }
            _ => {}
        }

        if self.discovery.namespace.is_none() {
            return Err(DtogenError::Config(
                "No namespace to generate: set discovery.namespace".to_string(),
            ));
        }

        if self.output.barrel_file.trim().is_empty() {
            return Err(DtogenError::Config(
                "output.barrel_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
        return content.to_string();
    };

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DtogenConfig::default();
        assert_eq!(config.output.barrel_file, "dto.exports.ts");
        assert_eq!(config.output.dir, Path::new("generated"));
        assert!(!config.source.is_configured());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [source]
            schema = "schema.json"

            [discovery]
            namespace = "Shop.Dtos"
        "#;

        let config = DtogenConfig::parse_toml(toml).unwrap();
        assert_eq!(config.discovery.namespace.as_deref(), Some("Shop.Dtos"));
        assert!(!config.discovery.include_nested_namespaces);
        assert_eq!(config.output.barrel_file, DEFAULT_BARREL_FILE);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [source]
            src_dir = "src"

            [output]
            dir = "frontend/src/dto"
            barrel_file = "index.ts"

            [discovery]
            namespace = "crate::dto"
            include_nested_namespaces = true
        "#;

        let config = DtogenConfig::parse_toml(toml).unwrap();
        assert_eq!(config.output.dir, Path::new("frontend/src/dto"));
        assert_eq!(config.output.barrel_file, "index.ts");
        assert!(config.discovery.include_nested_namespaces);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_missing_source() {
        let toml = r#"
            [discovery]
            namespace = "Shop.Dtos"
        "#;

        let config = DtogenConfig::parse_toml(toml).unwrap();
        assert!(matches!(config.validate(), Err(DtogenError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_two_sources() {
        let mut config = DtogenConfig::default();
        config.source.schema = Some("a.json".into());
        config.source.src_dir = Some("src".into());
        config.discovery.namespace = Some("Shop".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DTOGEN_TEST_OUT_DIR", "/tmp/dto-out");

        let toml = r#"
            [output]
            dir = "${DTOGEN_TEST_OUT_DIR}"
        "#;

        let config = DtogenConfig::parse_toml(toml).unwrap();
        assert_eq!(config.output.dir, Path::new("/tmp/dto-out"));

        std::env::remove_var("DTOGEN_TEST_OUT_DIR");
    }
}
