// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation and namespace resolution

use crate::config::Config;
use crate::error::{CrudError, Result};
use kube::{Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// Infer connection parameters from the kubeconfig (or in-cluster environment)
/// and return a client together with the namespace the workflow runs in.
#[instrument(skip(config))]
pub async fn connect(config: &Config) -> Result<(Client, String)> {
    let kconfig = KConfig::infer()
        .await
        .map_err(|e| CrudError::KubeconfigError(format!("Failed to infer config: {}", e)))?;

    let namespace = resolve_namespace(config, &kconfig.default_namespace);
    debug!(
        "Resolved namespace {} (kubeconfig default: {})",
        namespace, kconfig.default_namespace
    );
    info!("Using cluster {}", kconfig.cluster_url);

    let client = Client::try_from(kconfig)
        .map_err(|e| CrudError::KubeconfigError(format!("Failed to create client: {}", e)))?;

    Ok((client, namespace))
}

fn resolve_namespace(config: &Config, kubeconfig_default: &str) -> String {
    config
        .namespace
        .clone()
        .unwrap_or_else(|| kubeconfig_default.to_string())
}
