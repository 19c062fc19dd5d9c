use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where type metadata comes from.
///
/// Exactly one of `schema` or `src_dir` must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// JSON or TOML schema file.
    pub schema: Option<PathBuf>,

    /// Rust source directory to scan for type declarations.
    pub src_dir: Option<PathBuf>,
}

impl SourceConfig {
    /// Whether a metadata source has been configured.
    pub fn is_configured(&self) -> bool {
        self.schema.is_some() || self.src_dir.is_some()
    }
}
