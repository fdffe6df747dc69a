// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::Result;
use k8s_openapi::api::core::v1::Pod;
use kube::api::PostParams;
use kube::{Api, ResourceExt};
use tracing::{info, instrument};

/// Create `pod` and return the server's copy, including its resourceVersion.
#[instrument(skip(api, pod), fields(pod = %pod.name_any()))]
pub async fn create_pod(api: &Api<Pod>, pod: &Pod) -> Result<Pod> {
    let created = api.create(&PostParams::default(), pod).await?;
    info!(
        "Created pod {} at version {}",
        created.name_any(),
        created.resource_version().unwrap_or_default()
    );
    Ok(created)
}
