//! Namespace snapshot
//!
//! One list per kind, captured once and never modified afterwards.

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Pod, Secret, Service};

/// Every resource the tree builder looks at, as listed from one namespace
#[derive(Debug, Clone, Default)]
pub struct ResourceCollections {
    pub services: Vec<Service>,
    pub config_maps: Vec<ConfigMap>,
    pub secrets: Vec<Secret>,
    pub pvcs: Vec<PersistentVolumeClaim>,
    pub pods: Vec<Pod>,
    pub deployments: Vec<Deployment>,
    pub stateful_sets: Vec<StatefulSet>,
    pub daemon_sets: Vec<DaemonSet>,
    pub replica_sets: Vec<ReplicaSet>,
    pub jobs: Vec<Job>,
    pub cron_jobs: Vec<CronJob>,
}

impl ResourceCollections {
    /// True when the namespace holds none of the root workload kinds
    ///
    /// Services, ConfigMaps, Secrets and PVCs without a workload do not count.
    pub fn has_no_workloads(&self) -> bool {
        self.deployments.is_empty()
            && self.stateful_sets.is_empty()
            && self.daemon_sets.is_empty()
            && self.jobs.is_empty()
            && self.cron_jobs.is_empty()
    }
}
