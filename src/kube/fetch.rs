//! Resource fetching
//!
//! Lists every kind the tree needs from one namespace. The trait is the seam
//! between the pure tree pipeline and the API server, so the pipeline can be
//! driven from a mock in tests.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{
    ConfigMap, Namespace, PersistentVolumeClaim, Pod, Secret, Service,
};
use kube::Api;
use kube::api::ListParams;
use serde::de::DeserializeOwned;

use crate::error::{TreeError, TreeResult};
use crate::kube::ResourceCollections;
use crate::models::ResourceKind;

/// Source of namespace snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Check whether the namespace exists
    async fn namespace_exists(&self, namespace: &str) -> TreeResult<bool>;

    /// List every resource kind in the namespace
    ///
    /// Any failed list call aborts the whole fetch.
    async fn fetch_resources(&self, namespace: &str) -> TreeResult<ResourceCollections>;
}

/// Fetcher backed by a live kube-rs client
pub struct KubeFetcher {
    client: kube::Client,
}

impl KubeFetcher {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceFetcher for KubeFetcher {
    async fn namespace_exists(&self, namespace: &str) -> TreeResult<bool> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let found = api
            .get_opt(namespace)
            .await
            .map_err(|source| TreeError::NamespaceLookup {
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(found.is_some())
    }

    async fn fetch_resources(&self, namespace: &str) -> TreeResult<ResourceCollections> {
        let client = &self.client;
        let (
            services,
            config_maps,
            secrets,
            pvcs,
            pods,
            deployments,
            stateful_sets,
            daemon_sets,
            replica_sets,
            jobs,
            cron_jobs,
        ) = futures::try_join!(
            list_namespaced::<Service>(client, namespace, ResourceKind::Service),
            list_namespaced::<ConfigMap>(client, namespace, ResourceKind::ConfigMap),
            list_namespaced::<Secret>(client, namespace, ResourceKind::Secret),
            list_namespaced::<PersistentVolumeClaim>(
                client,
                namespace,
                ResourceKind::PersistentVolumeClaim
            ),
            list_namespaced::<Pod>(client, namespace, ResourceKind::Pod),
            list_namespaced::<Deployment>(client, namespace, ResourceKind::Deployment),
            list_namespaced::<StatefulSet>(client, namespace, ResourceKind::StatefulSet),
            list_namespaced::<DaemonSet>(client, namespace, ResourceKind::DaemonSet),
            list_namespaced::<ReplicaSet>(client, namespace, ResourceKind::ReplicaSet),
            list_namespaced::<Job>(client, namespace, ResourceKind::Job),
            list_namespaced::<CronJob>(client, namespace, ResourceKind::CronJob),
        )?;

        Ok(ResourceCollections {
            services,
            config_maps,
            secrets,
            pvcs,
            pods,
            deployments,
            stateful_sets,
            daemon_sets,
            replica_sets,
            jobs,
            cron_jobs,
        })
    }
}

/// List one namespaced kind, returning the full collection
async fn list_namespaced<K>(
    client: &kube::Client,
    namespace: &str,
    kind: ResourceKind,
) -> TreeResult<Vec<K>>
where
    K: kube::Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let api: Api<K> = Api::namespaced(client.clone(), namespace);
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|source| TreeError::List {
            kind: kind.as_str(),
            source,
        })?;

    tracing::debug!(
        "Fetched {} {} object(s) from namespace {}",
        list.items.len(),
        kind,
        namespace
    );

    Ok(list.items)
}
