// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The individual pod lifecycle steps and the workflow that sequences them.

pub mod create;
pub mod delete;
pub mod patch;
pub mod update;
pub mod watch;
pub mod workflow;

pub use create::create_pod;
pub use delete::{confirm_deleted, delete_pod};
pub use patch::{patch_remove_annotation, remove_annotation_patch};
pub use update::{update_annotation, UpdateOutcome};
pub use watch::{wait_until_ready, PodSubscription, WatchOutcome};
pub use workflow::{Workflow, WorkflowReport};
