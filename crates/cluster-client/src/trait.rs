//! ClusterClient trait for mocking
//!
//! This trait abstracts every cluster call the migration controller makes,
//! so reconciliation can be unit tested without a live API server.
//! `KubeClusterClient` is the production implementation.

use crate::error::ClusterError;
use crds::{DeploymentConfig, MigrationPlanStatus, PlanPhase, Route};
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Service};

/// Trait for cluster API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
/// List calls return objects in the order the API server (or mock) lists them.
#[async_trait::async_trait]
pub trait ClusterClientTrait: Send + Sync {
    // Source reads
    async fn list_deployment_configs(&self, namespace: &str) -> Result<Vec<DeploymentConfig>, ClusterError>;
    async fn list_routes(&self, namespace: &str) -> Result<Vec<Route>, ClusterError>;
    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClusterError>;
    async fn list_persistent_volume_claims(&self, namespace: &str) -> Result<Vec<PersistentVolumeClaim>, ClusterError>;

    // Plan status subresource
    /// Merge-patches only `status.phase`, leaving the other status fields alone.
    async fn patch_plan_phase(&self, namespace: &str, name: &str, phase: PlanPhase) -> Result<(), ClusterError>;
    /// Replaces the whole status in one patch. `found` keys and an `output`
    /// absent from `status` do not survive from earlier writes.
    async fn patch_plan_status(&self, namespace: &str, name: &str, status: &MigrationPlanStatus) -> Result<(), ClusterError>;

    // Output artifact
    /// Creates or wholesale-replaces the ConfigMap named in its metadata.
    async fn apply_config_map(&self, config_map: &ConfigMap) -> Result<(), ClusterError>;
}
