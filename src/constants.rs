// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Annotation written by the update step and removed again by the patch step
pub mod annotations {
    pub const KEY: &str = "testing";
    pub const VALUE: &str = "true";
}

/// Pod condition used to decide readiness
pub mod conditions {
    pub const READY: &str = "Ready";
    pub const TRUE: &str = "True";
}

/// Defaults for the pod created by the workflow
pub mod pod {
    pub const NAME: &str = "hello-openshift";
    pub const IMAGE: &str = "openshift/hello-openshift";
    pub const READINESS_PORT: i32 = 8080;
}

/// Watch configuration
pub mod watch {
    /// Upper bound on how long to wait for the pod to become ready
    pub const READY_TIMEOUT_SECS: u64 = 300;
    /// Server-side timeout of a single watch request, reopened when it expires
    pub const SERVER_TIMEOUT_SECS: u32 = 290;
}

/// Conflict retry defaults for the update step
pub mod retry {
    pub const MAX_ATTEMPTS: usize = 5;
    pub const BASE_DELAY_MS: u64 = 10;
    pub const MAX_DELAY_MS: u64 = 1000;
}
