use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "archmap",
    about = "Architectural model and classification engine for source projects",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a raw-facts file and emit the project model
    Analyze {
        /// Path to the fact-bundle JSON produced by the parser
        facts: PathBuf,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optional classification config overriding the built-in tables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
