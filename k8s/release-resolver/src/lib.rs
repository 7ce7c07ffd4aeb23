//! Resolves the Kubernetes names, labels, ServiceAccount and datastore hosts of a Helm release of
//! the workflow platform chart, i.e. what the chart's `_helpers.tpl` computes at render time.

/// Contains the error handling tooling.
pub mod common;

/// Backing datastore selection and endpoints.
pub mod datastore;

/// Contains tools to read Helm charts and values files.
pub mod helm;

/// Kubernetes object metadata built from the resolved names and labels.
pub mod metadata;

/// Name and label derivation.
pub mod naming;

/// The input of a render pass.
pub mod release;

/// The aggregate output of a render pass.
pub mod render;

pub use common::error::{Error, Result};
pub use release::ReleaseConfig;
pub use render::ResolvedRelease;
