mod discover;
mod generate;

pub use discover::DiscoverCommand;
pub use generate::GenerateCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dtogen_codegen::{DiscoveryFilter, MetadataSource};
use dtogen_core::DtogenConfig;

/// dtogen - generate TypeScript declarations from DTO metadata
#[derive(Parser)]
#[command(name = "dtogen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate TypeScript files for a namespace.
    Generate(GenerateCommand),

    /// List the root types a generation run would produce.
    Discover(DiscoverCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        init_tracing(self.verbose);

        // Load .env if present
        dotenvy::dotenv().ok();

        match self.command {
            Commands::Generate(cmd) => cmd.execute(),
            Commands::Discover(cmd) => cmd.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()))
        .with_writer(std::io::stderr)
        .init();
}

/// Arguments selecting the metadata source and namespace.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Configuration file path.
    #[arg(short, long, default_value = "dtogen.toml")]
    pub config: String,

    /// JSON or TOML schema file (overrides config).
    #[arg(long, conflicts_with = "src")]
    pub schema: Option<PathBuf>,

    /// Rust source directory to scan (overrides config).
    #[arg(short, long)]
    pub src: Option<PathBuf>,

    /// Namespace to generate (overrides config).
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Include namespaces nested below the selected one.
    #[arg(long)]
    pub nested_namespaces: bool,
}

impl SourceArgs {
    /// Load the configuration file, if present, and apply command-line
    /// overrides.
    pub fn load_config(&self) -> Result<DtogenConfig> {
        let config_path = Path::new(&self.config);
        let mut config = if config_path.exists() {
            tracing::info!("Loading configuration from {}", self.config);
            DtogenConfig::from_file(config_path)?
        } else {
            tracing::debug!("No configuration file at {}, using defaults", self.config);
            DtogenConfig::default()
        };

        if let Some(schema) = &self.schema {
            config.source.schema = Some(schema.clone());
            config.source.src_dir = None;
        }
        if let Some(src) = &self.src {
            config.source.src_dir = Some(src.clone());
            config.source.schema = None;
        }
        if let Some(namespace) = &self.namespace {
            config.discovery.namespace = Some(namespace.clone());
        }
        if self.nested_namespaces {
            config.discovery.include_nested_namespaces = true;
        }

        Ok(config)
    }
}

/// Metadata source and discovery filter of a validated configuration.
pub fn run_inputs(config: &DtogenConfig) -> Result<(MetadataSource, DiscoveryFilter)> {
    config.validate().with_context(|| {
        "Invalid configuration. Pass --schema or --src and --namespace, or create dtogen.toml"
    })?;

    let source = MetadataSource::from_config(&config.source)?;
    let namespace = config.discovery.namespace.clone().unwrap_or_default();
    let filter = DiscoveryFilter::new(namespace)
        .with_nested_namespaces(config.discovery.include_nested_namespaces);

    Ok((source, filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "dtogen",
            "generate",
            "--schema",
            "schema.json",
            "--namespace",
            "Shop.Dtos",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_discover() {
        let cli = Cli::try_parse_from(["dtogen", "-v", "discover", "--src", "src", "-n", "crate"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_two_sources() {
        let cli = Cli::try_parse_from([
            "dtogen",
            "generate",
            "--schema",
            "schema.json",
            "--src",
            "src",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_overrides_apply_without_config_file() {
        let args = SourceArgs {
            config: "does-not-exist.toml".to_string(),
            schema: Some("schema.json".into()),
            src: None,
            namespace: Some("Shop.Dtos".to_string()),
            nested_namespaces: true,
        };

        let config = args.load_config().unwrap();
        let (source, filter) = run_inputs(&config).unwrap();
        assert_eq!(source, MetadataSource::SchemaFile("schema.json".into()));
        assert_eq!(filter.namespace, "Shop.Dtos");
        assert!(filter.include_nested_namespaces);
    }

    #[test]
    fn test_missing_namespace_is_rejected() {
        let args = SourceArgs {
            config: "does-not-exist.toml".to_string(),
            schema: Some("schema.json".into()),
            src: None,
            namespace: None,
            nested_namespaces: false,
        };

        let config = args.load_config().unwrap();
        assert!(run_inputs(&config).is_err());
    }
}
