//! Cluster client errors

use thiserror::Error;

/// Errors that can occur when talking to the Kubernetes API
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Status could not be encoded as a patch
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API rejected the request
    #[error("API error: {0}")]
    Api(String),
}
