use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use dtogen_codegen::{GenerationReport, TypeScriptGenerator};
use dtogen_core::DtogenConfig;

use super::{run_inputs, SourceArgs};

/// Generate TypeScript declarations.
#[derive(Parser)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (overrides config, defaults to `generated`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Barrel file name (overrides config, defaults to `dto.exports.ts`).
    #[arg(long)]
    pub barrel: Option<String>,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        let (source, filter) = run_inputs(&config)?;

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));

        pb.set_message(format!("Loading {}...", source));
        let schema = match source.load() {
            Ok(schema) => schema,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        };

        pb.set_message(format!("Generating types for {}...", filter.namespace));
        let generator = TypeScriptGenerator::new(&config.output.dir)
            .with_barrel_file(config.output.barrel_file.clone());
        let result = generator.generate(&schema, &filter);
        pb.finish_and_clear();

        let report = result?;
        print_report(&report, &config);
        Ok(())
    }

    fn load_config(&self) -> Result<DtogenConfig> {
        let mut config = self.source.load_config()?;
        if let Some(output) = &self.output {
            config.output.dir = output.clone();
        }
        if let Some(barrel) = &self.barrel {
            config.output.barrel_file = barrel.clone();
        }
        Ok(config)
    }
}

fn print_report(report: &GenerationReport, config: &DtogenConfig) {
    if report.types.is_empty() {
        println!(
            "{} No types found in namespace {}",
            style("!").yellow(),
            style(config.discovery.namespace.as_deref().unwrap_or_default()).cyan()
        );
        return;
    }

    println!(
        "{} Generated {} type(s) in {}",
        style("✓").green(),
        report.types.len(),
        style(config.output.dir.display()).cyan()
    );
    for name in &report.types {
        println!("  {} {}.ts", style("+").green(), name);
    }
    if let Some(barrel) = &report.barrel {
        println!("  {} {}", style("+").green(), barrel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCHEMA: &str = r#"{
        "types": [
            {
                "name": "Parent",
                "namespace": "Shop.Dtos",
                "kind": "class",
                "properties": [
                    { "name": "Id", "type": "int" },
                    { "name": "Lines", "type": "ICollection<Line>" }
                ]
            },
            {
                "name": "Line",
                "namespace": "Shop.Dtos",
                "kind": "class",
                "properties": [{ "name": "Amount", "type": "decimal" }]
            }
        ]
    }"#;

    fn command(dir: &std::path::Path) -> GenerateCommand {
        let schema = dir.join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        GenerateCommand {
            source: SourceArgs {
                config: dir.join("dtogen.toml").display().to_string(),
                schema: Some(schema),
                src: None,
                namespace: Some("Shop.Dtos".to_string()),
                nested_namespaces: false,
            },
            output: Some(dir.join("out")),
            barrel: Some("index.ts".to_string()),
        }
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = tempdir().unwrap();
        command(dir.path()).execute().unwrap();

        let out = dir.path().join("out");
        assert!(out.join("Parent.ts").exists());
        assert!(out.join("Line.ts").exists());
        let barrel = std::fs::read_to_string(out.join("index.ts")).unwrap();
        assert_eq!(
            barrel,
            "export {Parent} from \"./Parent\";\nexport {Line} from \"./Line\";\n"
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("dtogen.toml"),
            "[output]\ndir = \"from-config\"\nbarrel_file = \"config.ts\"\n\n[discovery]\nnamespace = \"Elsewhere\"\n",
        )
        .unwrap();

        let config = command(dir.path()).load_config().unwrap();
        assert_eq!(config.output.dir, dir.path().join("out"));
        assert_eq!(config.output.barrel_file, "index.ts");
        assert_eq!(config.discovery.namespace.as_deref(), Some("Shop.Dtos"));
    }

    #[test]
    fn test_missing_schema_file_fails() {
        let dir = tempdir().unwrap();
        let mut cmd = command(dir.path());
        cmd.source.schema = Some(dir.path().join("missing.json"));

        assert!(cmd.execute().is_err());
        assert!(!dir.path().join("out").exists());
    }
}
