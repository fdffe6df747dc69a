// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Drives a single pod through create, ready, update, patch and delete.

use crate::config::Config;
use crate::constants::annotations;
use crate::error::Result;
use crate::lifecycle::{
    confirm_deleted, create_pod, delete_pod, patch_remove_annotation, update_annotation,
    wait_until_ready,
};
use crate::types::pod_from_settings;
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client, ResourceExt};
use serde::Serialize;
use tracing::{info, instrument};

/// Summary of a completed run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowReport {
    pub namespace: String,
    pub pod: String,
    pub created_version: Option<String>,
    pub ready_version: Option<String>,
    pub updated_version: Option<String>,
    pub update_attempts: usize,
    pub patched_version: Option<String>,
}

/// Runs the lifecycle steps in order against one namespace.
/// The first failing step ends the run; the pod is left in place in that case.
pub struct Workflow {
    pods: Api<Pod>,
    namespace: String,
    config: Config,
}

impl Workflow {
    pub fn new(client: Client, namespace: &str, config: Config) -> Self {
        Self {
            pods: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
            config,
        }
    }

    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn run(&self) -> Result<WorkflowReport> {
        let pod = pod_from_settings(&self.config.pod)?;

        info!("Creating pod {}", pod.name_any());
        let created = create_pod(&self.pods, &pod).await?;
        let name = created.name_any();

        info!(
            "Waiting up to {:?} for pod {} to become ready",
            self.config.ready_timeout, name
        );
        let ready = wait_until_ready(&self.pods, &created, self.config.ready_timeout).await?;

        let updated = update_annotation(
            &self.pods,
            &name,
            annotations::KEY,
            annotations::VALUE,
            &self.config.retry,
        )
        .await?;

        let patched = patch_remove_annotation(&self.pods, &name, annotations::KEY).await?;

        delete_pod(&self.pods, &name).await?;
        confirm_deleted(&self.pods, &name).await?;

        info!("Lifecycle of pod {} completed", name);
        Ok(WorkflowReport {
            namespace: self.namespace.clone(),
            pod: name,
            created_version: created.resource_version(),
            ready_version: ready.resource_version(),
            updated_version: updated.pod.resource_version(),
            update_attempts: updated.attempts,
            patched_version: patched.resource_version(),
        })
    }
}
