//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace used when `-n` is not given, ahead of the kubeconfig context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,

    /// Colour the rendered tree
    #[serde(default = "default_true")]
    pub color: bool,

    /// List the containers of every Pod beneath it
    #[serde(default = "default_true")]
    pub show_containers: bool,

    /// Colour per kind category
    #[serde(default)]
    pub colors: ColorConfig,

    /// Association rules used to hang related resources under workloads
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Colour names per kind category
///
/// Names follow crossterm (`dark_blue`, `green`, `grey`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    /// Deployment, StatefulSet, DaemonSet, Job and CronJob
    #[serde(default = "default_workload_color")]
    pub workload: String,

    #[serde(default = "default_pod_color")]
    pub pod: String,

    #[serde(default = "default_service_color")]
    pub service: String,

    /// ConfigMap and Secret
    #[serde(default = "default_config_color")]
    pub config: String,

    /// PersistentVolumeClaim
    #[serde(default = "default_storage_color")]
    pub storage: String,
}

/// Toggles for each association rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub selector_match: bool,

    #[serde(default = "default_true")]
    pub headless_service_name: bool,

    #[serde(default = "default_true")]
    pub volume_references: bool,

    #[serde(default = "default_true")]
    pub env_references: bool,

    #[serde(default = "default_true")]
    pub pvc_name_contains: bool,

    #[serde(default = "default_true")]
    pub volume_claim_templates: bool,
}

fn default_true() -> bool {
    true
}

fn default_workload_color() -> String {
    "dark_blue".to_string()
}

fn default_pod_color() -> String {
    "dark_green".to_string()
}

fn default_service_color() -> String {
    "dark_yellow".to_string()
}

fn default_config_color() -> String {
    "dark_magenta".to_string()
}

fn default_storage_color() -> String {
    "dark_cyan".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: None,
            color: default_true(),
            show_containers: default_true(),
            colors: ColorConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            workload: default_workload_color(),
            pod: default_pod_color(),
            service: default_service_color(),
            config: default_config_color(),
            storage: default_storage_color(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            selector_match: true,
            headless_service_name: true,
            volume_references: true,
            env_references: true,
            pvc_name_contains: true,
            volume_claim_templates: true,
        }
    }
}
