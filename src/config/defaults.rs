//! Default configuration values

use super::schema::Config;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "KUBECTL_TREE_CONFIG_DIR";

/// Environment variable that turns colour on or off (`true`/`false`)
pub const COLOR_ENV: &str = "KUBECTL_TREE_COLOR";

/// Environment variable that sets the fallback namespace
pub const DEFAULT_NAMESPACE_ENV: &str = "KUBECTL_TREE_DEFAULT_NAMESPACE";

/// Get the default configuration
pub fn default_config() -> Config {
    Config::default()
}
