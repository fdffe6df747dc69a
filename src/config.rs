// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Workflow configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Overrides the namespace of the current kubeconfig context
    pub namespace: Option<String>,
    pub pod: PodSettings,
    /// How long to wait for the pod to report Ready
    pub ready_timeout: Duration,
    pub retry: RetryConfig,
}

/// Describes the pod the workflow creates
#[derive(Debug, Clone)]
pub struct PodSettings {
    pub name: String,
    pub image: String,
    pub readiness_port: i32,
    /// YAML manifest used instead of the built-in pod definition
    pub manifest: Option<PathBuf>,
}

/// Bounds for retrying an update that lost an optimistic concurrency race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of update attempts, including the first one
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: constants::retry::MAX_ATTEMPTS,
            base_delay: Duration::from_millis(constants::retry::BASE_DELAY_MS),
            max_delay: Duration::from_millis(constants::retry::MAX_DELAY_MS),
            jitter: true,
        }
    }
}

impl Default for PodSettings {
    fn default() -> Self {
        Self {
            name: constants::pod::NAME.to_string(),
            image: constants::pod::IMAGE.to_string(),
            readiness_port: constants::pod::READINESS_PORT,
            manifest: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PodSettings::default();
        let pod = PodSettings {
            name: lookup("POD_NAME").unwrap_or(defaults.name),
            image: lookup("POD_IMAGE").unwrap_or(defaults.image),
            readiness_port: parse_var(&lookup, "READINESS_PORT")?
                .unwrap_or(defaults.readiness_port),
            manifest: lookup("POD_MANIFEST").map(PathBuf::from),
        };

        let ready_timeout = Duration::from_secs(
            parse_var(&lookup, "READY_TIMEOUT_SECS")?
                .unwrap_or(constants::watch::READY_TIMEOUT_SECS),
        );

        let default_retry = RetryConfig::default();
        let retry = RetryConfig {
            max_attempts: parse_var(&lookup, "UPDATE_MAX_ATTEMPTS")?
                .unwrap_or(default_retry.max_attempts),
            base_delay: parse_var(&lookup, "UPDATE_BASE_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(default_retry.base_delay),
            max_delay: parse_var(&lookup, "UPDATE_MAX_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(default_retry.max_delay),
            jitter: parse_var(&lookup, "UPDATE_JITTER")?.unwrap_or(default_retry.jitter),
        };

        if retry.max_attempts == 0 {
            anyhow::bail!("UPDATE_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            namespace: lookup("NAMESPACE").filter(|ns| !ns.is_empty()),
            pod,
            ready_timeout,
            retry,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}
