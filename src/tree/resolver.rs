//! Relationship resolver
//!
//! Answers "what belongs under this resource?" against one immutable
//! snapshot: owned objects through owner references, associated objects
//! through the rules in [`crate::tree::rules`].

use k8s_openapi::api::apps::v1::ReplicaSet;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Pod, PodSpec, Secret, Service};
use kube::{Resource, ResourceExt};

use crate::kube::ResourceCollections;
use crate::models::ResourceKind;
use crate::tree::index::OwnerIndex;
use crate::tree::models::{FoundSet, ResourceRef};
use crate::tree::rules::{self, RuleSet};
use crate::tree::workload::Workload;

/// Resources associated with one workload
#[derive(Debug, Default)]
pub struct RelatedResources<'a> {
    pub services: Vec<&'a Service>,
    pub config_maps: Vec<&'a ConfigMap>,
    pub secrets: Vec<&'a Secret>,
    pub pvcs: Vec<&'a PersistentVolumeClaim>,
}

impl RelatedResources<'_> {
    pub fn len(&self) -> usize {
        self.services.len() + self.config_maps.len() + self.secrets.len() + self.pvcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All related resources as refs: services, config maps, secrets, then PVCs
    pub fn refs(&self) -> Vec<ResourceRef> {
        let services = self
            .services
            .iter()
            .map(|s| ResourceRef::new(ResourceKind::Service, s.name_any()));
        let config_maps = self
            .config_maps
            .iter()
            .map(|c| ResourceRef::new(ResourceKind::ConfigMap, c.name_any()));
        let secrets = self
            .secrets
            .iter()
            .map(|s| ResourceRef::new(ResourceKind::Secret, s.name_any()));
        let pvcs = self
            .pvcs
            .iter()
            .map(|p| ResourceRef::new(ResourceKind::PersistentVolumeClaim, p.name_any()));

        services.chain(config_maps).chain(secrets).chain(pvcs).collect()
    }
}

/// Lookups over one namespace snapshot
pub struct Resolver<'a> {
    collections: &'a ResourceCollections,
    rules: RuleSet,
    pods: OwnerIndex<'a, Pod>,
    replica_sets: OwnerIndex<'a, ReplicaSet>,
    jobs: OwnerIndex<'a, Job>,
}

impl<'a> Resolver<'a> {
    pub fn new(collections: &'a ResourceCollections, rules: RuleSet) -> Self {
        let resolver = Self {
            collections,
            rules,
            pods: OwnerIndex::new(&collections.pods),
            replica_sets: OwnerIndex::new(&collections.replica_sets),
            jobs: OwnerIndex::new(&collections.jobs),
        };
        tracing::debug!(
            "Indexed owners: {} of pods, {} of replica sets, {} of jobs",
            resolver.pods.owner_count(),
            resolver.replica_sets.owner_count(),
            resolver.jobs.owner_count()
        );
        resolver
    }

    /// Pods with an owner reference to `(owner_kind, owner_name)`
    pub fn find_pods_by_owner(&self, owner_kind: &str, owner_name: &str) -> Vec<&'a Pod> {
        self.pods.owned_by(owner_kind, owner_name)
    }

    /// ReplicaSets with an owner reference to `(owner_kind, owner_name)`
    pub fn find_replica_sets_by_owner(
        &self,
        owner_kind: &str,
        owner_name: &str,
    ) -> Vec<&'a ReplicaSet> {
        self.replica_sets.owned_by(owner_kind, owner_name)
    }

    /// Jobs with an owner reference to `(owner_kind, owner_name)`
    pub fn find_jobs_by_owner(&self, owner_kind: &str, owner_name: &str) -> Vec<&'a Job> {
        self.jobs.owned_by(owner_kind, owner_name)
    }

    /// Infer the Services, ConfigMaps, Secrets and PVCs a workload uses
    ///
    /// Services are matched fresh for every workload. ConfigMaps, Secrets and
    /// PVCs are claimed in `found`; anything already claimed by an earlier
    /// workload is skipped.
    pub fn find_related_resources(
        &self,
        workload: &Workload<'_>,
        pod_spec: Option<&PodSpec>,
        found: &mut FoundSet,
    ) -> RelatedResources<'a> {
        let mut related = RelatedResources {
            services: self.find_services(workload),
            ..Default::default()
        };

        if self.rules.volume_claim_templates {
            for pvc_name in rules::claim_template_pvc_names(workload) {
                tracing::debug!(
                    "Looking for StatefulSet VolumeClaimTemplate PVC: {}",
                    pvc_name
                );
                if let Some(pvc) = by_name(&self.collections.pvcs, &pvc_name) {
                    claim_into(found, ResourceKind::PersistentVolumeClaim, pvc, &mut related.pvcs);
                }
            }
        }

        let Some(pod_spec) = pod_spec else {
            return related;
        };

        if self.rules.volume_references {
            for reference in rules::volume_references(pod_spec) {
                self.attach_reference(workload, &reference, found, &mut related);
            }
        }

        if self.rules.env_references {
            for reference in rules::env_references(pod_spec) {
                self.attach_reference(workload, &reference, found, &mut related);
            }
        }

        related
    }

    fn find_services(&self, workload: &Workload<'_>) -> Vec<&'a Service> {
        self.collections
            .services
            .iter()
            .filter(|service| {
                (self.rules.selector_match && rules::selector_matches(service, workload))
                    || (self.rules.headless_service_name
                        && rules::headless_name_matches(service, workload))
            })
            .collect()
    }

    fn attach_reference(
        &self,
        workload: &Workload<'_>,
        reference: &ResourceRef,
        found: &mut FoundSet,
        related: &mut RelatedResources<'a>,
    ) {
        let collections = self.collections;
        match reference.kind {
            ResourceKind::ConfigMap => {
                if let Some(config_map) = by_name(&collections.config_maps, &reference.name) {
                    claim_into(found, reference.kind, config_map, &mut related.config_maps);
                }
            }
            ResourceKind::Secret => {
                if let Some(secret) = by_name(&collections.secrets, &reference.name) {
                    claim_into(found, reference.kind, secret, &mut related.secrets);
                }
            }
            ResourceKind::PersistentVolumeClaim => {
                if let Some(pvc) = by_name(&collections.pvcs, &reference.name) {
                    claim_into(found, reference.kind, pvc, &mut related.pvcs);
                } else if self.rules.pvc_name_contains {
                    for pvc in collections
                        .pvcs
                        .iter()
                        .filter(|pvc| rules::pvc_name_contains(pvc, workload))
                    {
                        tracing::debug!(
                            "Found StatefulSet PVC: {} for {}",
                            pvc.name_any(),
                            workload.name()
                        );
                        claim_into(found, reference.kind, pvc, &mut related.pvcs);
                    }
                }
            }
            _ => {}
        }
    }
}

/// First resource with exactly this name; names are unique per kind in a namespace
fn by_name<'a, K: Resource>(items: &'a [K], name: &str) -> Option<&'a K> {
    items
        .iter()
        .find(|item| item.meta().name.as_deref() == Some(name))
}

/// Push `item` unless the found set already holds it
fn claim_into<'a, K: Resource>(
    found: &mut FoundSet,
    kind: ResourceKind,
    item: &'a K,
    out: &mut Vec<&'a K>,
) {
    if found.claim(ResourceRef::new(kind, item.name_any())) {
        out.push(item);
    } else {
        tracing::debug!("Skipping {}/{}: already attached", kind, item.name_any());
    }
}
