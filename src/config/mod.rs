//! Configuration for kubectl-tree
//!
//! A single YAML file layered over built-in defaults and environment
//! overrides. Command line flags are applied on top by the binary.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use defaults::{COLOR_ENV, CONFIG_DIR_ENV, DEFAULT_NAMESPACE_ENV};
pub use loader::ConfigLoader;
pub use schema::{ColorConfig, Config, RulesConfig};

use anyhow::Context;
use crossterm::style::Color;

use crate::tree::{Palette, RuleSet, TreeOptions, parse_color};

/// Every key understood by `config get` and `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "defaultNamespace",
    "color",
    "showContainers",
    "colors.workload",
    "colors.pod",
    "colors.service",
    "colors.config",
    "colors.storage",
    "rules.selectorMatch",
    "rules.headlessServiceName",
    "rules.volumeReferences",
    "rules.envReferences",
    "rules.pvcNameContains",
    "rules.volumeClaimTemplates",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    let rules = &config.rules;
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone().unwrap_or_default()),
        "color" => Ok(config.color.to_string()),
        "showContainers" => Ok(config.show_containers.to_string()),
        "colors.workload" => Ok(config.colors.workload.clone()),
        "colors.pod" => Ok(config.colors.pod.clone()),
        "colors.service" => Ok(config.colors.service.clone()),
        "colors.config" => Ok(config.colors.config.clone()),
        "colors.storage" => Ok(config.colors.storage.clone()),
        "rules.selectorMatch" => Ok(rules.selector_match.to_string()),
        "rules.headlessServiceName" => Ok(rules.headless_service_name.to_string()),
        "rules.volumeReferences" => Ok(rules.volume_references.to_string()),
        "rules.envReferences" => Ok(rules.env_references.to_string()),
        "rules.pvcNameContains" => Ok(rules.pvc_name_contains.to_string()),
        "rules.volumeClaimTemplates" => Ok(rules.volume_claim_templates.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "defaultNamespace" => {
            if value.is_empty() {
                config.default_namespace = None;
            } else {
                crate::kube::validate_namespace(value)?;
                config.default_namespace = Some(value.to_string());
            }
        }
        "color" => {
            config.color = parse_bool(key, value)?;
        }
        "showContainers" => config.show_containers = parse_bool(key, value)?,
        "colors.workload" | "colors.pod" | "colors.service" | "colors.config"
        | "colors.storage" => {
            if parse_color(value).is_none() {
                return Err(anyhow::anyhow!("{} must be a colour name, got '{}'", key, value));
            }
            let slot = match key {
                "colors.workload" => &mut config.colors.workload,
                "colors.pod" => &mut config.colors.pod,
                "colors.service" => &mut config.colors.service,
                "colors.config" => &mut config.colors.config,
                _ => &mut config.colors.storage,
            };
            *slot = value.to_string();
        }
        "rules.selectorMatch" => config.rules.selector_match = parse_bool(key, value)?,
        "rules.headlessServiceName" => {
            config.rules.headless_service_name = parse_bool(key, value)?
        }
        "rules.volumeReferences" => config.rules.volume_references = parse_bool(key, value)?,
        "rules.envReferences" => config.rules.env_references = parse_bool(key, value)?,
        "rules.pvcNameContains" => config.rules.pvc_name_contains = parse_bool(key, value)?,
        "rules.volumeClaimTemplates" => {
            config.rules.volume_claim_templates = parse_bool(key, value)?
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    value
        .parse()
        .with_context(|| format!("{} must be 'true' or 'false'", key))
}

impl RulesConfig {
    pub fn to_rule_set(&self) -> RuleSet {
        RuleSet {
            selector_match: self.selector_match,
            headless_service_name: self.headless_service_name,
            volume_references: self.volume_references,
            env_references: self.env_references,
            pvc_name_contains: self.pvc_name_contains,
            volume_claim_templates: self.volume_claim_templates,
        }
    }
}

impl ColorConfig {
    /// Build the palette, keeping the built-in colour for any unknown name
    pub fn to_palette(&self) -> Palette {
        let defaults = Palette::default();
        Palette {
            workload: color_or(&self.workload, defaults.workload),
            pod: color_or(&self.pod, defaults.pod),
            service: color_or(&self.service, defaults.service),
            config: color_or(&self.config, defaults.config),
            storage: color_or(&self.storage, defaults.storage),
        }
    }
}

fn color_or(name: &str, fallback: Color) -> Color {
    parse_color(name).unwrap_or_else(|| {
        tracing::warn!("Unknown colour '{}', using {:?}", name, fallback);
        fallback
    })
}

impl Config {
    /// Tree options for this config; `color_allowed` is false under `--no-color`
    pub fn tree_options(&self, color_allowed: bool) -> TreeOptions {
        TreeOptions {
            rules: self.rules.to_rule_set(),
            palette: (self.color && color_allowed).then(|| self.colors.to_palette()),
            show_containers: self.show_containers,
        }
    }
}
