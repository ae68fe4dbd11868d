//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and the list calls that
//! produce a namespace snapshot.

pub mod collections;
pub mod fetch;
pub mod namespace;

pub use collections::ResourceCollections;
pub use fetch::{KubeFetcher, ResourceFetcher};
pub use namespace::{DEFAULT_NAMESPACE, resolve_namespace, validate_namespace};

use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use crate::error::{TreeError, TreeResult};

/// A connected client plus the namespace its kubeconfig context points at
pub struct ClusterConnection {
    pub client: Client,
    /// Namespace of the current context, `default` when the context sets none
    pub context_namespace: String,
}

/// Initialize a Kubernetes client
///
/// With an explicit kubeconfig path that file is loaded with its current
/// context. Otherwise the default loading strategy applies:
/// 1. KUBECONFIG environment variable
/// 2. ~/.kube/config
/// 3. In-cluster config (if running in a pod)
pub async fn connect(kubeconfig: Option<&Path>) -> TreeResult<ClusterConnection> {
    let config = match kubeconfig {
        Some(path) => {
            tracing::debug!("Loading kubeconfig from {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
        }
        None => Config::infer().await?,
    };

    tracing::debug!(
        "Cluster {} with context namespace {}",
        config.cluster_url,
        config.default_namespace
    );

    let context_namespace = config.default_namespace.clone();
    let client = Client::try_from(config).map_err(TreeError::Client)?;

    Ok(ClusterConnection {
        client,
        context_namespace,
    })
}
