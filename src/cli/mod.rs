//! CLI argument parsing and subcommand handling

mod config;
mod logging;
mod version;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::{display_version, version_line};

/// Show the resources of a namespace as a tree of owners and what they use
#[derive(Parser, Debug)]
#[command(name = "kubectl-tree")]
#[command(about = "Show namespace resources as a tree", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Namespace to show the tree for (defaults to the current context namespace)
    #[arg(short = 'n', long = "namespace")]
    pub namespace: Option<String>,

    /// Path to the kubeconfig file
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Stop at Pods instead of listing their containers
    #[arg(long)]
    pub no_containers: bool,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Show version information
    #[arg(long)]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}
