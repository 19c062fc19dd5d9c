//! Metadata sources a schema can be loaded from.

use std::path::PathBuf;

use dtogen_core::config::SourceConfig;
use dtogen_core::{DtogenError, Schema};

use crate::Result;

/// Where a run reads its type metadata from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// JSON or TOML schema file.
    SchemaFile(PathBuf),
    /// Directory of Rust sources scanned with the source parser.
    RustSources(PathBuf),
}

impl MetadataSource {
    /// Pick the source named by the configuration.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        match (&config.schema, &config.src_dir) {
            (Some(schema), None) => Ok(MetadataSource::SchemaFile(schema.clone())),
            (None, Some(src_dir)) => Ok(MetadataSource::RustSources(src_dir.clone())),
            (Some(_), Some(_)) => Err(DtogenError::Config(
                "source.schema and source.src_dir are mutually exclusive".to_string(),
            )
            .into()),
            (None, None) => Err(DtogenError::Config(
                "No metadata source: set source.schema or source.src_dir".to_string(),
            )
            .into()),
        }
    }

    /// Load the schema.
    pub fn load(&self) -> Result<Schema> {
        match self {
            MetadataSource::SchemaFile(path) => Ok(Schema::from_file(path)?),
            MetadataSource::RustSources(dir) => {
                if !dir.is_dir() {
                    return Err(DtogenError::Config(format!(
                        "Source directory not found: {}",
                        dir.display()
                    ))
                    .into());
                }
                crate::parser::parse_project(dir)
            }
        }
    }
}

impl std::fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataSource::SchemaFile(path) => write!(f, "schema {}", path.display()),
            MetadataSource::RustSources(dir) => write!(f, "Rust sources in {}", dir.display()),
        }
    }
}
