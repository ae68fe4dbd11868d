//! Shared fixtures for integration tests
//!
//! Builds k8s-openapi objects directly; only the fields the tree looks at are set.

#![allow(dead_code)]

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{
    DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec, ReplicaSet, StatefulSet,
    StatefulSetSpec,
};
use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, Job, JobSpec, JobTemplateSpec};
use k8s_openapi::api::core::v1::{
    ConfigMap, ConfigMapEnvSource, ConfigMapKeySelector, ConfigMapVolumeSource, Container,
    EnvFromSource, EnvVar, EnvVarSource, PersistentVolumeClaim,
    PersistentVolumeClaimVolumeSource, Pod, PodSpec, PodTemplateSpec, Secret, SecretEnvSource,
    SecretKeySelector, SecretVolumeSource, Service, ServiceSpec, Volume,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

pub fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn meta(name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some("demo".to_string()),
        ..Default::default()
    }
}

pub fn owned_meta(name: &str, owner_kind: &str, owner_name: &str) -> ObjectMeta {
    ObjectMeta {
        owner_references: Some(vec![OwnerReference {
            api_version: "apps/v1".to_string(),
            kind: owner_kind.to_string(),
            name: owner_name.to_string(),
            uid: format!("{}-uid", owner_name),
            controller: Some(true),
            ..Default::default()
        }]),
        ..meta(name)
    }
}

pub fn template(pod_labels: &[(&str, &str)], spec: PodSpec) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(labels(pod_labels)),
            ..Default::default()
        }),
        spec: Some(spec),
    }
}

// Pod specs

pub fn container(name: &str) -> Container {
    Container {
        name: name.to_string(),
        image: Some("busybox".to_string()),
        ..Default::default()
    }
}

pub fn pod_spec(volumes: Vec<Volume>) -> PodSpec {
    PodSpec {
        containers: vec![container("main")],
        volumes: Some(volumes),
        ..Default::default()
    }
}

pub fn pod_spec_with_container(container: Container) -> PodSpec {
    PodSpec {
        containers: vec![container],
        ..Default::default()
    }
}

pub fn config_map_volume(name: &str) -> Volume {
    Volume {
        name: format!("{}-vol", name),
        config_map: Some(ConfigMapVolumeSource {
            name: name.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn secret_volume(name: &str) -> Volume {
    Volume {
        name: format!("{}-vol", name),
        secret: Some(SecretVolumeSource {
            secret_name: Some(name.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn pvc_volume(claim: &str) -> Volume {
    Volume {
        name: format!("{}-vol", claim),
        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
            claim_name: claim.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn env_from_config_map(name: &str) -> EnvFromSource {
    EnvFromSource {
        config_map_ref: Some(ConfigMapEnvSource {
            name: name.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn env_from_secret(name: &str) -> EnvFromSource {
    EnvFromSource {
        secret_ref: Some(SecretEnvSource {
            name: name.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn env_secret_key(var: &str, secret: &str) -> EnvVar {
    EnvVar {
        name: var.to_string(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret.to_string(),
                key: "value".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn env_config_map_key(var: &str, config_map: &str) -> EnvVar {
    EnvVar {
        name: var.to_string(),
        value_from: Some(EnvVarSource {
            config_map_key_ref: Some(ConfigMapKeySelector {
                name: config_map.to_string(),
                key: "value".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// Workloads

pub fn deployment(name: &str, pod_labels: &[(&str, &str)], spec: PodSpec) -> Deployment {
    Deployment {
        metadata: meta(name),
        spec: Some(DeploymentSpec {
            template: template(pod_labels, spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn stateful_set(
    name: &str,
    pod_labels: &[(&str, &str)],
    spec: PodSpec,
    claim_templates: &[&str],
) -> StatefulSet {
    StatefulSet {
        metadata: meta(name),
        spec: Some(StatefulSetSpec {
            template: template(pod_labels, spec),
            volume_claim_templates: Some(
                claim_templates
                    .iter()
                    .map(|t| PersistentVolumeClaim {
                        metadata: ObjectMeta {
                            name: Some(t.to_string()),
                            ..Default::default()
                        },
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn daemon_set(name: &str, pod_labels: &[(&str, &str)], spec: PodSpec) -> DaemonSet {
    DaemonSet {
        metadata: meta(name),
        spec: Some(DaemonSetSpec {
            template: template(pod_labels, spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn job(name: &str, spec: PodSpec) -> Job {
    Job {
        metadata: meta(name),
        spec: Some(JobSpec {
            template: template(&[], spec),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn cron_owned_job(name: &str, cron_job: &str, spec: PodSpec) -> Job {
    Job {
        metadata: owned_meta(name, "CronJob", cron_job),
        ..job(name, spec)
    }
}

pub fn cron_job(name: &str, spec: PodSpec) -> CronJob {
    CronJob {
        metadata: meta(name),
        spec: Some(CronJobSpec {
            schedule: "0 3 * * *".to_string(),
            job_template: JobTemplateSpec {
                spec: Some(JobSpec {
                    template: template(&[], spec),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn replica_set(name: &str, deployment: &str) -> ReplicaSet {
    ReplicaSet {
        metadata: owned_meta(name, "Deployment", deployment),
        ..Default::default()
    }
}

pub fn pod(name: &str, owner_kind: &str, owner_name: &str) -> Pod {
    Pod {
        metadata: owned_meta(name, owner_kind, owner_name),
        ..Default::default()
    }
}

pub fn pod_with_containers(
    name: &str,
    owner_kind: &str,
    owner_name: &str,
    containers: &[&str],
) -> Pod {
    Pod {
        spec: Some(PodSpec {
            containers: containers.iter().map(|c| container(c)).collect(),
            ..Default::default()
        }),
        ..pod(name, owner_kind, owner_name)
    }
}

// Related resources

pub fn service(name: &str, selector: &[(&str, &str)]) -> Service {
    Service {
        metadata: meta(name),
        spec: Some(ServiceSpec {
            selector: (!selector.is_empty()).then(|| labels(selector)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn config_map(name: &str) -> ConfigMap {
    ConfigMap {
        metadata: meta(name),
        ..Default::default()
    }
}

pub fn secret(name: &str) -> Secret {
    Secret {
        metadata: meta(name),
        ..Default::default()
    }
}

pub fn pvc(name: &str) -> PersistentVolumeClaim {
    PersistentVolumeClaim {
        metadata: meta(name),
        ..Default::default()
    }
}
