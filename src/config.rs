use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::Backend;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Input configuration - where to find the api description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the api.json document
    pub api_file: PathBuf,
}

/// Output configuration - where and what to generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving every generated file
    pub dir: PathBuf,
    /// Backends to render, by tag
    #[serde(default = "default_backends")]
    pub backends: Vec<String>,
}

/// Render configuration - options shared by every backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Emit JSDoc comments from summaries and descriptions
    #[serde(default)]
    pub include_doc: bool,
    /// Suffix of generated module class names
    #[serde(default = "default_module_class_suffix")]
    pub module_class_suffix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            include_doc: false,
            module_class_suffix: default_module_class_suffix(),
        }
    }
}

fn default_backends() -> Vec<String> {
    Backend::ALL.iter().map(|b| b.tag().to_string()).collect()
}

fn default_module_class_suffix() -> String {
    "Module".to_string()
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.input.api_file = expand_home(&config.input.api_file);
        config.output.dir = expand_home(&config.output.dir);

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.input.api_file.is_file() {
            anyhow::bail!(
                "Api file does not exist: {}",
                self.input.api_file.display()
            );
        }

        self.backends()?;

        Ok(())
    }

    /// Requested backends, in configuration order without repeats
    pub fn backends(&self) -> Result<Vec<Backend>> {
        let mut backends = Vec::new();
        for tag in &self.output.backends {
            let backend: Backend = tag.parse()?;
            if !backends.contains(&backend) {
                backends.push(backend);
            }
        }
        Ok(backends)
    }

    /// Generate a default configuration
    pub fn default_config() -> Self {
        Config {
            input: InputConfig {
                api_file: PathBuf::from("api.json"),
            },
            output: OutputConfig {
                dir: PathBuf::from("generated"),
                backends: default_backends(),
            },
            render: RenderConfig::default(),
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
