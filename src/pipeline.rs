//! Generation pipeline - load, resolve, render, then write

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::generator::{generate, GeneratorContext};
use crate::resolver::{resolve_json, ResolvedApi};

/// Runs one generation from a validated configuration
pub struct Pipeline {
    verbose: bool,
}

impl Pipeline {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Read and resolve the configured api file
    pub fn load(&self, api_file: &Path) -> Result<ResolvedApi> {
        let json = fs::read_to_string(api_file)
            .with_context(|| format!("Failed to read api file: {}", api_file.display()))?;

        let api = resolve_json(&json)
            .with_context(|| format!("Failed to resolve api file: {}", api_file.display()))?;

        if self.verbose {
            info!(
                version = api.version(),
                modules = api.modules().len(),
                "Loaded api"
            );
        }

        Ok(api)
    }

    /// Render every configured backend into one file map
    pub fn render(&self, api: &ResolvedApi, config: &Config) -> Result<BTreeMap<String, String>> {
        let ctx = GeneratorContext::new(config.render.clone());
        let mut files = BTreeMap::new();

        for backend in config.backends()? {
            let rendered = generate(api, backend, &ctx);
            debug!(%backend, files = rendered.len(), "Rendered backend");
            files.extend(rendered);
        }

        Ok(files)
    }

    /// Run the pipeline, returning the written paths
    pub fn run(&self, config: &Config) -> Result<Vec<PathBuf>> {
        let api = self.load(&config.input.api_file)?;
        let files = self.render(&api, config)?;

        fs::create_dir_all(&config.output.dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.output.dir.display()
            )
        })?;

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in &files {
            let path = config.output.dir.join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            debug!(path = %path.display(), bytes = content.len(), "Wrote file");
            written.push(path);
        }

        info!(
            files = written.len(),
            dir = %config.output.dir.display(),
            "Generation finished"
        );

        Ok(written)
    }
}
