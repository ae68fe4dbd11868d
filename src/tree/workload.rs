//! Uniform access to the workload kinds
//!
//! Deployments, StatefulSets, DaemonSets and Jobs carry their pod template at
//! `.spec.template` and CronJobs one level deeper through the job template.
//! `Workload` hides that difference.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::models::ResourceKind;

/// Borrowed view of any object that runs pods
#[derive(Debug, Clone, Copy)]
pub enum Workload<'a> {
    Deployment(&'a Deployment),
    StatefulSet(&'a StatefulSet),
    DaemonSet(&'a DaemonSet),
    Job(&'a Job),
    CronJob(&'a CronJob),
}

impl<'a> Workload<'a> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Workload::Deployment(_) => ResourceKind::Deployment,
            Workload::StatefulSet(_) => ResourceKind::StatefulSet,
            Workload::DaemonSet(_) => ResourceKind::DaemonSet,
            Workload::Job(_) => ResourceKind::Job,
            Workload::CronJob(_) => ResourceKind::CronJob,
        }
    }

    pub fn metadata(&self) -> &'a ObjectMeta {
        match self {
            Workload::Deployment(d) => &d.metadata,
            Workload::StatefulSet(s) => &s.metadata,
            Workload::DaemonSet(d) => &d.metadata,
            Workload::Job(j) => &j.metadata,
            Workload::CronJob(c) => &c.metadata,
        }
    }

    pub fn name(&self) -> &'a str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    /// Labels on the workload object itself
    pub fn labels(&self) -> Option<&'a BTreeMap<String, String>> {
        self.metadata().labels.as_ref()
    }

    /// Labels stamped onto the pods the workload creates
    pub fn template_labels(&self) -> Option<&'a BTreeMap<String, String>> {
        self.pod_template()
            .and_then(|t| t.metadata.as_ref())
            .and_then(|m| m.labels.as_ref())
    }

    /// PVC templates of a StatefulSet; empty for every other kind
    pub fn volume_claim_templates(&self) -> &'a [PersistentVolumeClaim] {
        match self {
            Workload::StatefulSet(s) => s
                .spec
                .as_ref()
                .and_then(|spec| spec.volume_claim_templates.as_deref())
                .unwrap_or_default(),
            _ => &[],
        }
    }

    fn pod_template(&self) -> Option<&'a PodTemplateSpec> {
        match self {
            Workload::Deployment(d) => d.spec.as_ref().map(|s| &s.template),
            Workload::StatefulSet(s) => s.spec.as_ref().map(|s| &s.template),
            Workload::DaemonSet(d) => d.spec.as_ref().map(|s| &s.template),
            Workload::Job(j) => j.spec.as_ref().map(|s| &s.template),
            Workload::CronJob(c) => c
                .spec
                .as_ref()
                .and_then(|s| s.job_template.spec.as_ref())
                .map(|s| &s.template),
        }
    }
}

/// Extract the pod spec a workload runs, if it declares one
pub fn extract_pod_spec<'a>(workload: &Workload<'a>) -> Option<&'a PodSpec> {
    workload.pod_template().and_then(|t| t.spec.as_ref())
}
