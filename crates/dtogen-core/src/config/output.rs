use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default name of the re-export barrel file.
pub const DEFAULT_BARREL_FILE: &str = "dto.exports.ts";

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated files are written to.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Name of the barrel file re-exporting every generated type.
    #[serde(default = "default_barrel_file")]
    pub barrel_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            barrel_file: default_barrel_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_barrel_file() -> String {
    DEFAULT_BARREL_FILE.to_string()
}

/// Discovery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Namespace whose types are generated.
    pub namespace: Option<String>,

    /// Also accept types from namespaces nested below `namespace`.
    #[serde(default)]
    pub include_nested_namespaces: bool,
}
