//! kubectl-tree library
//!
//! Builds a tree of the resources in one namespace: workloads with the
//! ReplicaSets, Jobs and Pods they own, plus the Services, ConfigMaps, Secrets
//! and PVCs they use. It can be used both as a binary and as a library for
//! testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod kube;
pub mod models;
pub mod tree;

pub use crate::error::{TreeError, TreeResult};
pub use crate::kube::{KubeFetcher, ResourceCollections, ResourceFetcher};
pub use crate::models::ResourceKind;
pub use crate::tree::{TreeOptions, TreeOutput, build_and_render};

/// Check the namespace, fetch its snapshot and render the tree
///
/// A missing namespace is [`TreeError::NamespaceNotFound`]; any fetch error
/// aborts without partial output.
pub async fn run<F>(fetcher: &F, namespace: &str, options: &TreeOptions) -> TreeResult<TreeOutput>
where
    F: ResourceFetcher + ?Sized,
{
    if !fetcher.namespace_exists(namespace).await? {
        return Err(TreeError::NamespaceNotFound(namespace.to_string()));
    }

    let collections = fetcher.fetch_resources(namespace).await?;
    tracing::debug!(
        "Fetched {} pods and {} services from {}",
        collections.pods.len(),
        collections.services.len(),
        namespace
    );

    Ok(build_and_render(namespace, &collections, options))
}
