// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON Patch removal of a pod annotation.

use crate::error::{CrudError, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Patch, PatchParams};
use kube::Api;
use tracing::{info, instrument};

/// JSON pointer to an annotation. Keys like `example.com/owner` contain `/`, which must be escaped.
pub fn annotation_pointer(key: &str) -> String {
    format!(
        "/metadata/annotations/{}",
        key.replace('~', "~0").replace('/', "~1")
    )
}

/// A patch document holding a single `remove` of the annotation `key`
pub fn remove_annotation_patch(key: &str) -> Result<json_patch::Patch> {
    let doc = serde_json::json!([{ "op": "remove", "path": annotation_pointer(key) }]);
    serde_json::from_value(doc)
        .map_err(|e| CrudError::KubeError(kube::Error::SerdeError(e)))
}

/// Remove annotation `key` from pod `name` without a read-modify-write cycle.
/// The server rejects the patch when the annotation is absent.
#[instrument(skip(api))]
pub async fn patch_remove_annotation(api: &Api<Pod>, name: &str, key: &str) -> Result<Pod> {
    let patch = remove_annotation_patch(key)?;
    let pod = api
        .patch(name, &PatchParams::default(), &Patch::Json::<()>(patch))
        .await?;

    info!("Removed annotation {} from pod {}", key, name);
    Ok(pod)
}
