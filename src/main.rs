use anyhow::Result;
use sdk_codegen::cli::{Cli, Commands};
use sdk_codegen::config::{expand_home, Config};
use sdk_codegen::pipeline::Pipeline;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Generate {
            config,
            backends,
            output,
            verbose,
        } => {
            init_logging(verbose);
            run_generate(&config, backends, output, verbose)?;
        }
        Commands::Init { output, force } => {
            init_logging(false);
            run_init(&output, force)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the verbosity flag
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Run the generate command
fn run_generate(
    config_path: &Path,
    backends: Vec<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    tracing::debug!(path = %config_path.display(), "Loaded configuration");

    if !backends.is_empty() {
        config.output.backends = backends;
    }
    if let Some(output) = output {
        config.output.dir = expand_home(&output);
    }
    config.validate()?;

    let pipeline = Pipeline::new(verbose);
    pipeline.run(&config)?;
    Ok(())
}

/// Run the init command
fn run_init(output_path: &Path, force: bool) -> Result<()> {
    if output_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    let config = Config::default_config();
    config.save(output_path)?;

    println!("Created configuration file: {}", output_path.display());
    println!("\nEdit the file to configure:");
    println!("  - api_file: Path to the api.json schema");
    println!("  - dir: Output directory for generated files");
    println!("  - backends: Any of \"ts\", \"docs\"");
    println!("  - include_doc: Emit doc comments in TypeScript output");

    Ok(())
}
