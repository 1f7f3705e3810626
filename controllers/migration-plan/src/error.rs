//! Controller-specific error types.
//!
//! This module defines the failure taxonomy of a reconcile pass. Listing
//! failures are recoverable and end up as status notes; the rest are fatal
//! for the pass and are handed back to the controller runtime for requeue.

use cluster_client::ClusterError;
use thiserror::Error;

/// A source kind could not be listed in one namespace.
///
/// The display form is what lands in `status.notes`.
#[derive(Debug, Error)]
#[error("error listing {kind} in namespace {namespace}: {source}")]
pub struct ListError {
    /// Display name of the kind, e.g. "Routes"
    pub kind: &'static str,
    /// Namespace that was being scanned
    pub namespace: String,
    /// Underlying API failure
    #[source]
    pub source: ClusterError,
}

/// Errors that can occur in the MigrationPlan Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error outside a pass (client construction, watch)
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Plan status could not be persisted; the pass left no new phase behind
    #[error("Failed to update MigrationPlan status: {0}")]
    StatusWrite(#[source] ClusterError),

    /// Output ConfigMap could not be written; status was set to Error
    #[error("Failed to write output ConfigMap {name}: {source}")]
    OutputWrite {
        /// Resolved ConfigMap name
        name: String,
        /// Underlying API failure
        #[source]
        source: ClusterError,
    },

    /// The pass deadline expired while waiting on the cluster
    #[error("Reconcile pass cancelled: {0}")]
    Cancelled(String),

    /// Manifest rendering failed; status was set to Error
    #[error("Failed to render manifests: {0}")]
    Render(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Plan object lacks name or namespace
    #[error("MigrationPlan is missing {0}")]
    MissingMetadata(&'static str),
}
