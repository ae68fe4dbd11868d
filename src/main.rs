//! kubectl-tree - show the resources of a Kubernetes namespace as a tree
//!
//! Workloads are listed with the ReplicaSets, Jobs and Pods they own and the
//! Services, ConfigMaps, Secrets and PVCs they use.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use kubectl_tree::cli::{self, Args, Command};
use kubectl_tree::config::ConfigLoader;
use kubectl_tree::kube::{self as cluster, KubeFetcher};
use kubectl_tree::{TreeOutput, run};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        cli::display_version();
        return ExitCode::SUCCESS;
    }

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let result = match args.command {
        Some(Command::Config { subcommand }) => cli::handle_config_command(subcommand),
        None => show_tree(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Exiting with error: {:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn show_tree(args: &Args) -> Result<()> {
    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    });

    tracing::debug!("Initializing Kubernetes client");
    let connection = cluster::connect(args.kubeconfig.as_deref()).await?;

    let namespace = cluster::resolve_namespace(
        args.namespace.as_deref(),
        config.default_namespace.as_deref(),
        Some(connection.context_namespace.as_str()),
    )?;
    tracing::debug!("Showing tree for namespace {}", namespace);

    let mut options = config.tree_options(!args.no_color);
    options.show_containers &= !args.no_containers;
    let fetcher = KubeFetcher::new(connection.client);

    match run(&fetcher, &namespace, &options).await? {
        TreeOutput::Empty => println!("No resources found in {} namespace.", namespace),
        TreeOutput::Tree(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
