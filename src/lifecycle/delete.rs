// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod deletion and the follow-up NotFound check.

use crate::error::{CrudError, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::DeleteParams;
use kube::Api;
use tracing::{debug, info, instrument};

/// Delete pod `name`. The pod must exist.
#[instrument(skip(api))]
pub async fn delete_pod(api: &Api<Pod>, name: &str) -> Result<()> {
    api.delete(name, &DeleteParams::default())
        .await?
        .map_left(|pod| {
            debug!(
                "Deletion of pod {} started at {:?}",
                name, pod.metadata.deletion_timestamp
            );
        });

    info!("Deleted pod {}", name);
    Ok(())
}

/// Delete pod `name` a second time and expect the server to report it as gone.
/// A successful delete means the pod still exists.
#[instrument(skip(api))]
pub async fn confirm_deleted(api: &Api<Pod>, name: &str) -> Result<()> {
    match api.delete(name, &DeleteParams::default()).await {
        Ok(_) => Err(CrudError::StillPresent(name.to_string())),
        Err(e) => {
            let err = CrudError::from(e);
            if err.is_not_found() {
                info!("Pod {} is gone", name);
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}
