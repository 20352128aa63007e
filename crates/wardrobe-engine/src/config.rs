//! Engine settings.
//!
//! # Configuration Sources (in priority order, highest to lowest)
//!
//! 1. Command line flags (applied by the caller)
//! 2. Environment variables (`WARDROBE_*`)
//! 3. `[engine]` table of a `wardrobe.toml` (loaded by the caller)
//! 4. Built-in defaults

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WardrobeError};

/// Default per-candidate solver timeout
pub const DEFAULT_SOLVE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Per-candidate solver timeout in milliseconds, 0 disables it
    pub solve_timeout_ms: u64,
    /// Check candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solve_timeout_ms: DEFAULT_SOLVE_TIMEOUT_MS,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn solve_timeout(&self) -> Option<Duration> {
        match self.solve_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn with_solve_timeout_ms(mut self, ms: u64) -> Self {
        self.solve_timeout_ms = ms;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Reads `WARDROBE_*` overrides.
#[derive(Debug)]
pub struct ConfigLoader {
    use_environment: bool,
}

impl ConfigLoader {
    pub fn new(use_environment: bool) -> Self {
        Self { use_environment }
    }

    /// Environment variable for a config key, "solve-timeout-ms" -> "WARDROBE_SOLVE_TIMEOUT_MS"
    pub fn env_name(key: &str) -> String {
        format!("WARDROBE_{}", key.replace('-', "_").to_uppercase())
    }

    /// Get a WARDROBE_* environment variable for a config key
    pub fn get_env(&self, key: &str) -> Option<String> {
        if !self.use_environment {
            return None;
        }

        env::var(Self::env_name(key)).ok().filter(|s| !s.is_empty())
    }

    /// Apply environment overrides on top of `config`
    pub fn apply_environment(&self, config: &mut EngineConfig) -> Result<()> {
        apply_overrides(config, |key| self.get_env(key))
    }
}

/// Apply overrides looked up by config key. Values that do not parse are an error.
pub fn apply_overrides<F>(config: &mut EngineConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("solve-timeout-ms") {
        config.solve_timeout_ms = value.trim().parse().map_err(|_| {
            WardrobeError::Config(format!(
                "{} must be a number of milliseconds, got \"{}\"",
                ConfigLoader::env_name("solve-timeout-ms"),
                value
            ))
        })?;
    }

    if let Some(value) = lookup("parallel") {
        config.parallel = parse_bool(&value).ok_or_else(|| {
            WardrobeError::Config(format!(
                "{} must be true or false, got \"{}\"",
                ConfigLoader::env_name("parallel"),
                value
            ))
        })?;
    }

    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
