use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate TypeScript bindings and reference docs from an api.json schema
#[derive(Parser, Debug)]
#[command(name = "sdk-codegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate bindings and docs
    Generate {
        /// Path to configuration file
        #[arg(short, long, default_value = "sdk-codegen.toml")]
        config: PathBuf,

        /// Backends to render instead of the configured ones (ts, docs)
        #[arg(short, long = "backend")]
        backends: Vec<String>,

        /// Output directory instead of the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "sdk-codegen.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
