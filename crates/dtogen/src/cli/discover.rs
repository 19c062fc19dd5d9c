use anyhow::Result;
use clap::Parser;
use console::style;

use dtogen_codegen::{TypeDiscoverer, TypeScriptGenerator};

use super::{run_inputs, SourceArgs};

/// List root types and the files a generation run would write.
#[derive(Parser)]
pub struct DiscoverCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl DiscoverCommand {
    /// Execute the discover command.
    pub fn execute(self) -> Result<()> {
        let config = self.source.load_config()?;
        let (source, filter) = run_inputs(&config)?;
        let schema = source.load()?;

        let roots = TypeDiscoverer::new(&schema).discover(&filter)?;
        if roots.is_empty() {
            println!(
                "{} No types found in namespace {}",
                style("!").yellow(),
                style(&filter.namespace).cyan()
            );
            return Ok(());
        }

        println!(
            "{} {} root type(s) in {}:",
            style("→").cyan(),
            roots.len(),
            style(&filter.namespace).cyan()
        );
        for root in &roots {
            println!("  {}", root);
        }

        let files = TypeScriptGenerator::new(&config.output.dir)
            .with_barrel_file(config.output.barrel_file.clone())
            .render(&schema, &filter)?;

        println!();
        println!("Files:");
        for file in &files {
            println!(
                "  {}",
                style(config.output.dir.join(&file.name).display()).dim()
            );
        }

        Ok(())
    }
}
