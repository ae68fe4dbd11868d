//! Association rules
//!
//! Each way a resource can be linked to a workload without an owner reference
//! is a separate named function here. The resolver combines them; a `RuleSet`
//! switches individual rules off.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{PersistentVolumeClaim, PodSpec, Service};

use crate::models::ResourceKind;
use crate::tree::models::ResourceRef;
use crate::tree::workload::Workload;

/// Which association rules are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// Service selector is a subset of the workload's labels
    pub selector_match: bool,
    /// StatefulSet service named `<name>` or `<name>-headless`
    pub headless_service_name: bool,
    /// ConfigMap, Secret and PVC volumes of the pod template
    pub volume_references: bool,
    /// `envFrom` and `env.valueFrom` references of every container
    pub env_references: bool,
    /// StatefulSet PVCs whose name contains the workload name
    pub pvc_name_contains: bool,
    /// StatefulSet PVCs named `<template>-<name>-0`
    pub volume_claim_templates: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl RuleSet {
    /// Every rule enabled
    pub fn all() -> Self {
        Self {
            selector_match: true,
            headless_service_name: true,
            volume_references: true,
            env_references: true,
            pvc_name_contains: true,
            volume_claim_templates: true,
        }
    }
}

/// True if every selector pair is present with the same value in `labels`
///
/// An empty or absent selector never matches.
pub fn selector_subset_of(
    selector: Option<&BTreeMap<String, String>>,
    labels: Option<&BTreeMap<String, String>>,
) -> bool {
    let Some(selector) = selector.filter(|s| !s.is_empty()) else {
        return false;
    };
    let Some(labels) = labels else {
        return false;
    };
    selector
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}

/// Service selects the workload's own labels or the labels of its pods
pub fn selector_matches(service: &Service, workload: &Workload<'_>) -> bool {
    let selector = service.spec.as_ref().and_then(|s| s.selector.as_ref());
    selector_subset_of(selector, workload.labels())
        || selector_subset_of(selector, workload.template_labels())
}

/// Service paired with a StatefulSet by naming convention
///
/// Only the exact name and the `-headless` suffix count; a shared name prefix
/// does not.
pub fn headless_name_matches(service: &Service, workload: &Workload<'_>) -> bool {
    if workload.kind() != ResourceKind::StatefulSet {
        return false;
    }
    let Some(service_name) = service.metadata.name.as_deref() else {
        return false;
    };
    let name = workload.name();
    service_name == name || service_name == format!("{}-headless", name)
}

/// ConfigMaps, Secrets and PVCs mounted as volumes, in volume order
pub fn volume_references(pod_spec: &PodSpec) -> Vec<ResourceRef> {
    let mut refs = Vec::new();

    for volume in pod_spec.volumes.iter().flatten() {
        if let Some(config_map) = &volume.config_map {
            refs.push(ResourceRef::new(
                ResourceKind::ConfigMap,
                config_map.name.clone(),
            ));
        }

        if let Some(name) = volume.secret.as_ref().and_then(|s| s.secret_name.as_ref()) {
            refs.push(ResourceRef::new(ResourceKind::Secret, name.clone()));
        }

        if let Some(claim) = &volume.persistent_volume_claim {
            refs.push(ResourceRef::new(
                ResourceKind::PersistentVolumeClaim,
                claim.claim_name.clone(),
            ));
        }
    }

    refs
}

/// ConfigMaps and Secrets pulled into container environments
///
/// Covers whole-object `envFrom` sources and single keys sourced through
/// `env[].valueFrom`.
pub fn env_references(pod_spec: &PodSpec) -> Vec<ResourceRef> {
    let mut refs = Vec::new();

    for container in &pod_spec.containers {
        for env_from in container.env_from.iter().flatten() {
            if let Some(config_map_ref) = &env_from.config_map_ref {
                refs.push(ResourceRef::new(
                    ResourceKind::ConfigMap,
                    config_map_ref.name.clone(),
                ));
            }
            if let Some(secret_ref) = &env_from.secret_ref {
                refs.push(ResourceRef::new(
                    ResourceKind::Secret,
                    secret_ref.name.clone(),
                ));
            }
        }

        for env in container.env.iter().flatten() {
            let Some(value_from) = &env.value_from else {
                continue;
            };
            if let Some(secret_key) = &value_from.secret_key_ref {
                refs.push(ResourceRef::new(
                    ResourceKind::Secret,
                    secret_key.name.clone(),
                ));
            }
            if let Some(config_map_key) = &value_from.config_map_key_ref {
                refs.push(ResourceRef::new(
                    ResourceKind::ConfigMap,
                    config_map_key.name.clone(),
                ));
            }
        }
    }

    refs
}

/// PVC names a StatefulSet's claim templates produce for its first replica
///
/// Only ordinal 0 is derived: `<template>-<workload>-0`.
pub fn claim_template_pvc_names(workload: &Workload<'_>) -> Vec<String> {
    workload
        .volume_claim_templates()
        .iter()
        .filter_map(|template| template.metadata.name.as_deref())
        .map(|template| format!("{}-{}-0", template, workload.name()))
        .collect()
}

/// PVC name contains the StatefulSet name
///
/// Loose by nature: `db` also matches `data-dbx-0`.
pub fn pvc_name_contains(pvc: &PersistentVolumeClaim, workload: &Workload<'_>) -> bool {
    if workload.kind() != ResourceKind::StatefulSet || workload.name().is_empty() {
        return false;
    }
    pvc.metadata
        .name
        .as_deref()
        .is_some_and(|name| name.contains(workload.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
    use k8s_openapi::api::core::v1::{
        ConfigMapEnvSource, ConfigMapKeySelector, ConfigMapVolumeSource, Container,
        EnvFromSource, EnvVar, EnvVarSource, PersistentVolumeClaimVolumeSource,
        SecretEnvSource, SecretKeySelector, SecretVolumeSource, ServiceSpec, Volume,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn service(name: &str, selector: Option<BTreeMap<String, String>>) -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                selector,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn deployment(name: &str, workload_labels: &[(&str, &str)]) -> Deployment {
        Deployment {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(labels(workload_labels)),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn stateful_set(name: &str) -> StatefulSet {
        StatefulSet {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn pvc(name: &str) -> PersistentVolumeClaim {
        PersistentVolumeClaim {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_selector_subset() {
        let workload_labels = labels(&[("app", "web"), ("tier", "frontend")]);
        assert!(selector_subset_of(
            Some(&labels(&[("app", "web")])),
            Some(&workload_labels)
        ));
        assert!(!selector_subset_of(
            Some(&labels(&[("app", "web"), ("tier", "backend")])),
            Some(&workload_labels)
        ));
        assert!(!selector_subset_of(
            Some(&labels(&[("missing", "x")])),
            Some(&workload_labels)
        ));
    }

    #[test]
    fn test_empty_or_absent_selector_never_matches() {
        let workload_labels = labels(&[("app", "web")]);
        assert!(!selector_subset_of(Some(&BTreeMap::new()), Some(&workload_labels)));
        assert!(!selector_subset_of(None, Some(&workload_labels)));
        assert!(!selector_subset_of(Some(&labels(&[("app", "web")])), None));
    }

    #[test]
    fn test_selector_matches_workload_labels() {
        let web = deployment("web", &[("app", "web")]);
        let svc = service("web", Some(labels(&[("app", "web")])));
        let other = service("api", Some(labels(&[("app", "api")])));
        assert!(selector_matches(&svc, &Workload::Deployment(&web)));
        assert!(!selector_matches(&other, &Workload::Deployment(&web)));
    }

    #[test]
    fn test_headless_name_only_for_stateful_sets() {
        let db = stateful_set("db");
        let web = deployment("db", &[]);
        assert!(headless_name_matches(
            &service("db", None),
            &Workload::StatefulSet(&db)
        ));
        assert!(headless_name_matches(
            &service("db-headless", None),
            &Workload::StatefulSet(&db)
        ));
        assert!(!headless_name_matches(
            &service("db", None),
            &Workload::Deployment(&web)
        ));
    }

    #[test]
    fn test_headless_name_rejects_shared_prefix_or_suffix() {
        let db = stateful_set("db");
        for name in ["db-metrics", "dbx", "mongo-db", "db-headless-2"] {
            assert!(
                !headless_name_matches(&service(name, None), &Workload::StatefulSet(&db)),
                "{} should not match",
                name
            );
        }
    }

    #[test]
    fn test_volume_references() {
        let spec = PodSpec {
            volumes: Some(vec![
                Volume {
                    name: "config".to_string(),
                    config_map: Some(ConfigMapVolumeSource {
                        name: "settings".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                Volume {
                    name: "certs".to_string(),
                    secret: Some(SecretVolumeSource {
                        secret_name: Some("tls".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                Volume {
                    name: "data".to_string(),
                    persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                        claim_name: "data".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                Volume {
                    name: "scratch".to_string(),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let refs: Vec<String> = volume_references(&spec)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            refs,
            vec![
                "ConfigMap/settings",
                "Secret/tls",
                "PersistentVolumeClaim/data"
            ]
        );
    }

    #[test]
    fn test_env_references() {
        let spec = PodSpec {
            containers: vec![Container {
                name: "app".to_string(),
                env_from: Some(vec![
                    EnvFromSource {
                        config_map_ref: Some(ConfigMapEnvSource {
                            name: "app-env".to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                    EnvFromSource {
                        secret_ref: Some(SecretEnvSource {
                            name: "app-secrets".to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                ]),
                env: Some(vec![
                    EnvVar {
                        name: "PLAIN".to_string(),
                        value: Some("1".to_string()),
                        ..Default::default()
                    },
                    EnvVar {
                        name: "PASSWORD".to_string(),
                        value_from: Some(EnvVarSource {
                            secret_key_ref: Some(SecretKeySelector {
                                name: "db-password".to_string(),
                                key: "password".to_string(),
                                ..Default::default()
                            }),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                    EnvVar {
                        name: "MODE".to_string(),
                        value_from: Some(EnvVarSource {
                            config_map_key_ref: Some(ConfigMapKeySelector {
                                name: "modes".to_string(),
                                key: "mode".to_string(),
                                ..Default::default()
                            }),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            }],
            ..Default::default()
        };

        let refs: Vec<String> = env_references(&spec)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            refs,
            vec![
                "ConfigMap/app-env",
                "Secret/app-secrets",
                "Secret/db-password",
                "ConfigMap/modes"
            ]
        );
    }

    #[test]
    fn test_claim_template_names_cover_ordinal_zero_only() {
        use k8s_openapi::api::apps::v1::StatefulSetSpec;

        let db = StatefulSet {
            metadata: ObjectMeta {
                name: Some("db".to_string()),
                ..Default::default()
            },
            spec: Some(StatefulSetSpec {
                replicas: Some(3),
                volume_claim_templates: Some(vec![pvc("data"), pvc("wal")]),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            claim_template_pvc_names(&Workload::StatefulSet(&db)),
            vec!["data-db-0", "wal-db-0"]
        );
    }

    #[test]
    fn test_pvc_name_contains() {
        let db = stateful_set("db");
        let web = deployment("db", &[]);
        assert!(pvc_name_contains(&pvc("data-db-1"), &Workload::StatefulSet(&db)));
        assert!(pvc_name_contains(&pvc("dbx"), &Workload::StatefulSet(&db)));
        assert!(!pvc_name_contains(&pvc("cache"), &Workload::StatefulSet(&db)));
        assert!(!pvc_name_contains(&pvc("data-db-1"), &Workload::Deployment(&web)));
    }

    #[test]
    fn test_default_rule_set_enables_everything() {
        let rules = RuleSet::default();
        assert_eq!(rules, RuleSet::all());
        assert!(rules.headless_service_name && rules.pvc_name_contains);
    }
}
