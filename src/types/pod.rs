// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::config::PodSettings;
use crate::constants::conditions;
use crate::error::{CrudError, Result};
use k8s_openapi::api::core::v1::{Container, HTTPGetAction, Pod, PodSpec, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use kube_runtime::wait::Condition;
use std::path::Path;

/// Build the single-container pod with an HTTP readiness probe and no termination grace period.
pub fn build_pod(settings: &PodSettings) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(settings.name.clone()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: settings.name.clone(),
                image: Some(settings.image.clone()),
                readiness_probe: Some(Probe {
                    http_get: Some(HTTPGetAction {
                        port: IntOrString::Int(settings.readiness_port),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            termination_grace_period_seconds: Some(0),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Load a pod from a YAML manifest. The configured name is used when the manifest has none.
pub fn load_manifest(path: &Path, default_name: &str) -> Result<Pod> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CrudError::ManifestError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut pod: Pod = serde_yaml::from_str(&raw).map_err(|e| {
        CrudError::ManifestError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    if pod.spec.is_none() {
        return Err(CrudError::ManifestError(format!(
            "{} does not define a pod spec",
            path.display()
        )));
    }

    if pod.metadata.name.as_deref().map_or(true, str::is_empty) {
        pod.metadata.name = Some(default_name.to_string());
    }
    Ok(pod)
}

/// The pod to create: the manifest when one is configured, the built-in definition otherwise.
pub fn pod_from_settings(settings: &PodSettings) -> Result<Pod> {
    match &settings.manifest {
        Some(path) => load_manifest(path, &settings.name),
        None => Ok(build_pod(settings)),
    }
}

/// Matches once the pod reports condition Ready=True
pub fn is_pod_ready() -> impl Condition<Pod> {
    |obj: Option<&Pod>| {
        obj.and_then(|pod| pod.status.as_ref())
            .and_then(|status| status.conditions.as_ref())
            .is_some_and(|conds| {
                conds
                    .iter()
                    .any(|c| c.type_ == conditions::READY && c.status == conditions::TRUE)
            })
    }
}
