// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrudError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to resolve kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid pod manifest: {0}")]
    ManifestError(String),

    #[error("Unexpected {event} event while watching pod {name}")]
    UnexpectedWatchEvent { name: String, event: String },

    #[error("Pod {name} did not become ready within {timeout:?}")]
    ReadyTimeout { name: String, timeout: Duration },

    #[error("Pod {0} has no resourceVersion")]
    MissingResourceVersion(String),

    #[error("Pod {0} still exists after it was deleted")]
    StillPresent(String),
}

/// Coarse classification of a failure, used to decide between retry and abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The submitted resourceVersion is stale
    Conflict,
    /// The object does not exist
    NotFound,
    Other,
}

impl CrudError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CrudError::KubeError(kube::Error::Api(resp)) => match resp.code {
                409 if resp.reason == "Conflict" => ErrorKind::Conflict,
                404 => ErrorKind::NotFound,
                _ => ErrorKind::Other,
            },
            _ => ErrorKind::Other,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, CrudError>;
