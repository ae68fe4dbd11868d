//! Where the config file lives
//!
//! `$KUBECTL_TREE_CONFIG_DIR`, else `$XDG_CONFIG_HOME/kubectl-tree`, else
//! `~/.config/kubectl-tree`, the same on every platform.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use super::defaults::CONFIG_DIR_ENV;

const APP_NAME: &str = "kubectl-tree";

pub fn config_dir() -> PathBuf {
    pick_config_dir(
        non_empty_env(CONFIG_DIR_ENV),
        non_empty_env("XDG_CONFIG_HOME"),
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
    )
}

fn non_empty_env(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn pick_config_dir(
    explicit: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    explicit.unwrap_or_else(|| {
        xdg_config_home
            .or_else(|| home.map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_NAME)
    })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
