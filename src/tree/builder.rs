//! Tree assembly
//!
//! Walks the root workload kinds in a fixed order and hangs owned and
//! associated resources beneath each one.

use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;

use crate::kube::ResourceCollections;
use crate::models::ResourceKind;
use crate::tree::models::{FoundSet, ResourceNode};
use crate::tree::TreeOptions;
use crate::tree::resolver::Resolver;
use crate::tree::workload::{Workload, extract_pod_spec};

/// Build the namespace tree
///
/// Returns `None` when the namespace has no Deployments, StatefulSets,
/// DaemonSets, Jobs or CronJobs. Root children are appended in that order,
/// then every child list is sorted by `(kind, name)`. With
/// `show_containers`, every Pod gets one child per container.
pub fn build_tree(
    namespace: &str,
    collections: &ResourceCollections,
    options: &TreeOptions,
) -> Option<ResourceNode> {
    if collections.has_no_workloads() {
        tracing::debug!("No workloads in namespace {}", namespace);
        return None;
    }

    let resolver = Resolver::new(collections, options.rules);
    let pods = PodNodes {
        resolver: &resolver,
        show_containers: options.show_containers,
    };
    let mut found = FoundSet::new();
    let mut root = ResourceNode::new(ResourceKind::Namespace, namespace);

    for deployment in &collections.deployments {
        let workload = Workload::Deployment(deployment);
        let mut node = workload_node(&resolver, &workload, &mut found);

        let replica_sets =
            resolver.find_replica_sets_by_owner(ResourceKind::Deployment.as_str(), workload.name());
        for rs in replica_sets {
            let rs_name = rs.name_any();
            let mut rs_node = ResourceNode::new(ResourceKind::ReplicaSet, rs_name.as_str());
            pods.add(&mut rs_node, ResourceKind::ReplicaSet, &rs_name);
            node.add_child(rs_node);
        }

        root.add_child(node);
    }

    for stateful_set in &collections.stateful_sets {
        let workload = Workload::StatefulSet(stateful_set);
        let mut node = workload_node(&resolver, &workload, &mut found);
        pods.add(&mut node, ResourceKind::StatefulSet, workload.name());
        root.add_child(node);
    }

    for daemon_set in &collections.daemon_sets {
        let workload = Workload::DaemonSet(daemon_set);
        let mut node = workload_node(&resolver, &workload, &mut found);
        pods.add(&mut node, ResourceKind::DaemonSet, workload.name());
        root.add_child(node);
    }

    for job in collections.jobs.iter().filter(|job| !is_cron_job_owned(job)) {
        let workload = Workload::Job(job);
        let mut node = workload_node(&resolver, &workload, &mut found);
        pods.add(&mut node, ResourceKind::Job, workload.name());
        root.add_child(node);
    }

    // Jobs spawned by a CronJob get their pods but no related resources
    for cron_job in &collections.cron_jobs {
        let cron_job_name = cron_job.name_any();
        let mut node = ResourceNode::new(ResourceKind::CronJob, cron_job_name.as_str());

        for job in resolver.find_jobs_by_owner(ResourceKind::CronJob.as_str(), &cron_job_name) {
            let job_name = job.name_any();
            let mut job_node = ResourceNode::new(ResourceKind::Job, job_name.as_str());
            pods.add(&mut job_node, ResourceKind::Job, &job_name);
            node.add_child(job_node);
        }

        root.add_child(node);
    }

    root.sort_recursive();
    tracing::debug!("Built tree for {} with {} nodes", namespace, root.count());
    Some(root)
}

/// A Job counts as CronJob-owned when its first owner reference says so
pub fn is_cron_job_owned(job: &Job) -> bool {
    job.owner_references()
        .first()
        .is_some_and(|owner| owner.kind == ResourceKind::CronJob.as_str())
}

/// Node for a workload with its related resources already attached
fn workload_node(
    resolver: &Resolver<'_>,
    workload: &Workload<'_>,
    found: &mut FoundSet,
) -> ResourceNode {
    let mut node = ResourceNode::new(workload.kind(), workload.name());
    let related = resolver.find_related_resources(workload, extract_pod_spec(workload), found);

    tracing::debug!(
        "Found resources for {}: secrets={}, pvcs={}, configmaps={}, services={}",
        workload.name(),
        related.secrets.len(),
        related.pvcs.len(),
        related.config_maps.len(),
        related.services.len()
    );

    for resource in related.refs() {
        tracing::debug!("Adding {} to {}", resource, workload.name());
        node.add_child(ResourceNode::new(resource.kind, resource.name));
    }
    node
}

/// Hangs owned Pods, and optionally their containers, under a parent node
struct PodNodes<'r, 'a> {
    resolver: &'r Resolver<'a>,
    show_containers: bool,
}

impl PodNodes<'_, '_> {
    fn add(&self, parent: &mut ResourceNode, owner_kind: ResourceKind, owner_name: &str) {
        for pod in self.resolver.find_pods_by_owner(owner_kind.as_str(), owner_name) {
            let mut node = ResourceNode::new(ResourceKind::Pod, pod.name_any());
            if self.show_containers {
                add_containers(&mut node, pod);
            }
            parent.add_child(node);
        }
    }
}

/// One child per entry of `spec.containers`; init and ephemeral containers are skipped
fn add_containers(node: &mut ResourceNode, pod: &Pod) {
    let containers = pod.spec.iter().flat_map(|spec| &spec.containers);
    for container in containers {
        node.add_child(ResourceNode::new(
            ResourceKind::Container,
            container.name.as_str(),
        ));
    }
}
