// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod construction and inspection helpers.

pub mod pod;

pub use pod::{build_pod, is_pod_ready, load_manifest, pod_from_settings};
