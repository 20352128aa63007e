use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use wardrobe_engine::{ConfigLoader, EngineConfig};

pub const CONFIG_FILE: &str = "wardrobe.toml";

/// The wardrobe.toml configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WardrobeToml {
    /// Engine settings
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default format of `dress`
    pub format: OutputFormat,

    /// Show a spinner while candidates are checked
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            progress: true,
        }
    }
}

impl WardrobeToml {
    /// Load configuration from wardrobe.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: WardrobeToml = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                log::debug!("Loaded configuration from {}", config_path.display());
                return Ok(Some(config));
            }

            // Move to parent directory
            if !current.pop() {
                // Reached filesystem root, no config found
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }
}

/// Engine settings: defaults < wardrobe.toml < WARDROBE_* environment < flags
pub fn resolve_engine_config(
    file: Option<&WardrobeToml>,
    loader: &ConfigLoader,
    timeout_ms: Option<u64>,
    sequential: bool,
) -> Result<EngineConfig> {
    let mut config = file.map(|f| f.engine.clone()).unwrap_or_default();

    loader.apply_environment(&mut config)?;

    if let Some(ms) = timeout_ms {
        config.solve_timeout_ms = ms;
    }
    if sequential {
        config.parallel = false;
    }

    Ok(config)
}
