//! Resource kind definitions
//!
//! This module provides a centralized enum for every Kubernetes kind the tree
//! can contain, so owner-reference matching and rendering never compare
//! against scattered string literals.

use std::fmt;
use std::str::FromStr;

/// Enumeration of the Kubernetes kinds that appear in a namespace tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Namespace,
    // Workloads
    Deployment,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
    // Owned by workloads
    ReplicaSet,
    Pod,
    Container,
    // Associated with workloads
    Service,
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
}

/// Colour group a kind is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    Workload,
    Pod,
    Service,
    Config,
    Storage,
}

impl ResourceKind {
    /// Get the Kubernetes kind string, exactly as it appears in owner references
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::Job => "Job",
            ResourceKind::CronJob => "CronJob",
            ResourceKind::ReplicaSet => "ReplicaSet",
            ResourceKind::Pod => "Pod",
            ResourceKind::Container => "Container",
            ResourceKind::Service => "Service",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
        }
    }

    /// Get all resource kinds
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Namespace,
            ResourceKind::Deployment,
            ResourceKind::StatefulSet,
            ResourceKind::DaemonSet,
            ResourceKind::Job,
            ResourceKind::CronJob,
            ResourceKind::ReplicaSet,
            ResourceKind::Pod,
            ResourceKind::Container,
            ResourceKind::Service,
            ResourceKind::ConfigMap,
            ResourceKind::Secret,
            ResourceKind::PersistentVolumeClaim,
        ]
    }

    /// Whether this kind manages pods
    pub fn is_workload(&self) -> bool {
        matches!(
            self,
            ResourceKind::Deployment
                | ResourceKind::StatefulSet
                | ResourceKind::DaemonSet
                | ResourceKind::Job
                | ResourceKind::CronJob
        )
    }

    /// Colour group for rendering; `None` means the kind is printed uncoloured
    pub fn category(&self) -> Option<KindCategory> {
        match self {
            kind if kind.is_workload() => Some(KindCategory::Workload),
            ResourceKind::Pod => Some(KindCategory::Pod),
            ResourceKind::Service => Some(KindCategory::Service),
            ResourceKind::ConfigMap | ResourceKind::Secret => Some(KindCategory::Config),
            ResourceKind::PersistentVolumeClaim => Some(KindCategory::Storage),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Exact, case-sensitive match against the Kubernetes kind name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown resource kind: {}", s))
    }
}
