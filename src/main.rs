use anyhow::{Context, Result};
use clap::Parser;

use archmap::cli::{Cli, Commands};
use archmap::config::{self, ClassificationConfig};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            facts,
            output,
            config,
        } => {
            let classification = match config {
                Some(path) => load_config(&path)?,
                None => config::default_config().clone(),
            };
            let bundles = archmap::io::read_facts(&facts)
                .with_context(|| format!("reading facts from {}", facts.display()))?;
            let result = archmap::aggregator::analyze_project(&bundles, &classification);
            if let Some(error) = &result.error {
                log::warn!("analysis completed partially: {error}");
            }
            archmap::io::write_result(&result, output.as_deref(), &mut std::io::stdout())?;
            Ok(())
        }
    }
}

fn load_config(path: &std::path::Path) -> Result<ClassificationConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    serde_json::from_str(&content).context("parsing classification config")
}
