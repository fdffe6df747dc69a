// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-modify-write of pod annotations with retry on version conflicts.

use crate::config::RetryConfig;
use crate::error::{CrudError, Result};
use backon::{ExponentialBuilder, Retryable};
use k8s_openapi::api::core::v1::Pod;
use kube::api::PostParams;
use kube::{Api, ResourceExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument, warn};

/// The stored pod after a successful update and how many attempts it took
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub pod: Pod,
    pub attempts: usize,
}

/// Exponential backoff bounded by the retry configuration.
/// `max_attempts` counts the first attempt, so it allows `max_attempts - 1` retries.
pub fn backoff(retry: &RetryConfig) -> ExponentialBuilder {
    let builder = ExponentialBuilder::default()
        .with_min_delay(retry.base_delay)
        .with_max_delay(retry.max_delay)
        .with_max_times(retry.max_attempts.saturating_sub(1));

    if retry.jitter {
        builder.with_jitter()
    } else {
        builder
    }
}

/// Set `key=value` on the latest version of pod `name`.
///
/// Every attempt fetches the pod again and applies the change to that fresh copy before
/// replacing it, so a retried write never carries a stale resourceVersion. Only conflicts
/// are retried; any other failure is returned immediately.
#[instrument(skip(api, retry))]
pub async fn update_annotation(
    api: &Api<Pod>,
    name: &str,
    key: &str,
    value: &str,
    retry: &RetryConfig,
) -> Result<UpdateOutcome> {
    let attempts = AtomicUsize::new(0);
    let attempts_ref = &attempts;

    let pod = (|| async move {
        attempts_ref.fetch_add(1, Ordering::SeqCst);
        set_annotation_once(api, name, key, value).await
    })
    .retry(backoff(retry))
    .sleep(tokio::time::sleep)
    .when(CrudError::is_conflict)
    .notify(|err, delay| {
        warn!("Update of pod {} conflicted, retrying in {:?}: {}", name, delay, err);
    })
    .await?;

    let attempts = attempts.load(Ordering::SeqCst);
    info!(
        "Annotated pod {} with {}={} after {} attempt(s)",
        name, key, value, attempts
    );
    Ok(UpdateOutcome { pod, attempts })
}

async fn set_annotation_once(api: &Api<Pod>, name: &str, key: &str, value: &str) -> Result<Pod> {
    let mut pod = api.get(name).await?;
    debug!(
        "Fetched pod {} at version {}",
        name,
        pod.resource_version().unwrap_or_default()
    );

    pod.annotations_mut()
        .insert(key.to_string(), value.to_string());

    Ok(api.replace(name, &PostParams::default(), &pod).await?)
}
