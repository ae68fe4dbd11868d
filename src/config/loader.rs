//! Configuration loading and layering
//!
//! Precedence order (highest to lowest):
//! 1. Command line flags (applied by the caller)
//! 2. Environment variable overrides
//! 3. Config file
//! 4. Built-in defaults

use std::path::Path;

use anyhow::{Context, Result};

use super::defaults::{self, COLOR_ENV, DEFAULT_NAMESPACE_ENV};
use super::paths;
use super::schema::Config;
use crate::kube::validate_namespace;
use crate::tree::parse_color;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the root config file, if any, with environment overrides applied
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // An empty file is valid and means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::load_defaults());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root config file
    ///
    /// Fails on YAML errors, invalid value types, unknown colour names and an
    /// invalid `defaultNamespace`.
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            let config = Self::load_file(&root_path)?;
            Self::validate_config(&config)?;
        }
        Ok(())
    }

    /// Check values that serde alone cannot
    pub fn validate_config(config: &Config) -> Result<()> {
        let colors = &config.colors;
        for (key, name) in [
            ("colors.workload", &colors.workload),
            ("colors.pod", &colors.pod),
            ("colors.service", &colors.service),
            ("colors.config", &colors.config),
            ("colors.storage", &colors.storage),
        ] {
            if parse_color(name).is_none() {
                return Err(anyhow::anyhow!("{} has unknown colour '{}'", key, name));
            }
        }

        if let Some(namespace) = &config.default_namespace {
            validate_namespace(namespace).context("defaultNamespace is not usable")?;
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(color) = lookup(COLOR_ENV) {
            match color.parse::<bool>() {
                Ok(val) => config.color = val,
                Err(_) => {
                    tracing::warn!("Ignoring {}={}: expected true or false", COLOR_ENV, color)
                }
            }
        }

        if let Some(namespace) = lookup(DEFAULT_NAMESPACE_ENV).filter(|ns| !ns.is_empty()) {
            config.default_namespace = Some(namespace);
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
