// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use podcycle::config::Config;
use podcycle::kubernetes::connect;
use podcycle::lifecycle::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: pod={}, ready_timeout={:?}, update_attempts={}",
        config.pod.name, config.ready_timeout, config.retry.max_attempts
    );

    let (client, namespace) = connect(&config).await?;
    info!("Connected to Kubernetes cluster, using namespace {}", namespace);

    let report = Workflow::new(client, &namespace, config).run().await?;

    let summary = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    info!("Workflow finished:\n{}", summary);
    Ok(())
}
