// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for a pod to report Ready through a single-object watch.

use crate::constants::watch::SERVER_TIMEOUT_SECS;
use crate::error::{CrudError, Result};
use crate::types::is_pod_ready;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{WatchEvent, WatchParams};
use kube::{Api, ResourceExt};
use kube_runtime::wait::Condition;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// An open watch on exactly one pod. Dropping it closes the underlying connection.
pub struct PodSubscription<'a> {
    name: String,
    events: BoxStream<'a, kube::Result<WatchEvent<Pod>>>,
}

/// Result of draining a subscription
#[derive(Debug)]
pub enum WatchOutcome {
    /// The pod reported Ready; carries the snapshot that did
    Ready(Pod),
    /// The server ended the watch; carries the last resourceVersion seen
    Closed(String),
}

impl<'a> PodSubscription<'a> {
    /// Open a watch for changes to `name` after `resource_version`
    pub async fn open(api: &'a Api<Pod>, name: &str, resource_version: &str) -> Result<Self> {
        let wp = WatchParams::default()
            .fields(&format!("metadata.name={}", name))
            .timeout(SERVER_TIMEOUT_SECS)
            .disable_bookmarks();

        debug!("Opening watch on pod {} at version {}", name, resource_version);
        let events = api.watch(&wp, resource_version).await?.boxed();

        Ok(Self {
            name: name.to_string(),
            events,
        })
    }

    /// Receive the next event, `None` once the server closed the watch
    pub async fn recv(&mut self) -> Result<Option<WatchEvent<Pod>>> {
        Ok(self.events.try_next().await?)
    }

    /// Consume events until the pod is Ready or the server closes the stream.
    /// Anything but a Modified event is fatal.
    pub async fn wait_ready(&mut self, mut resource_version: String) -> Result<WatchOutcome> {
        let ready = is_pod_ready();

        while let Some(event) = self.recv().await? {
            let pod = match event {
                WatchEvent::Modified(pod) => pod,
                other => {
                    return Err(CrudError::UnexpectedWatchEvent {
                        name: self.name.clone(),
                        event: event_type(&other).to_string(),
                    })
                }
            };

            if let Some(version) = pod.resource_version() {
                resource_version = version;
            }
            debug!("Pod {} modified (version {})", self.name, resource_version);

            if ready.matches_object(Some(&pod)) {
                return Ok(WatchOutcome::Ready(pod));
            }
        }

        Ok(WatchOutcome::Closed(resource_version))
    }

    /// Cancel the watch
    pub fn stop(self) {
        debug!("Stopping watch on pod {}", self.name);
    }
}

fn event_type(event: &WatchEvent<Pod>) -> &'static str {
    match event {
        WatchEvent::Added(_) => "Added",
        WatchEvent::Modified(_) => "Modified",
        WatchEvent::Deleted(_) => "Deleted",
        WatchEvent::Bookmark(_) => "Bookmark",
        WatchEvent::Error(_) => "Error",
    }
}

/// Block until `pod` reports Ready=True, returning the snapshot that did.
///
/// The watch starts at the resourceVersion of `pod`, so every change after that
/// snapshot is observed. A watch closed by the server is reopened from the last
/// version seen. The whole wait is bounded by `timeout`.
#[instrument(skip(api, pod, timeout), fields(pod = %pod.name_any()))]
pub async fn wait_until_ready(api: &Api<Pod>, pod: &Pod, timeout: Duration) -> Result<Pod> {
    let name = pod.name_any();

    if is_pod_ready().matches_object(Some(pod)) {
        info!("Pod {} is already ready", name);
        return Ok(pod.clone());
    }

    let resource_version = pod
        .resource_version()
        .ok_or_else(|| CrudError::MissingResourceVersion(name.clone()))?;

    let ready = tokio::time::timeout(timeout, watch_until_ready(api, &name, resource_version))
        .await
        .map_err(|_| CrudError::ReadyTimeout {
            name: name.clone(),
            timeout,
        })??;

    info!("Pod {} is ready", name);
    Ok(ready)
}

async fn watch_until_ready(api: &Api<Pod>, name: &str, mut version: String) -> Result<Pod> {
    loop {
        let mut subscription = PodSubscription::open(api, name, &version).await?;
        match subscription.wait_ready(version).await? {
            WatchOutcome::Ready(ready) => {
                subscription.stop();
                return Ok(ready);
            }
            WatchOutcome::Closed(last) => {
                debug!("Watch on pod {} closed at version {}, reopening", name, last);
                version = last;
            }
        }
    }
}
