//! kube-rs backed cluster client
//!
//! Thin wrapper over `kube::Api` that implements `ClusterClientTrait` against
//! a live API server.

use crate::cluster_trait::ClusterClientTrait;
use crate::error::ClusterError;
use crds::{DeploymentConfig, MigrationPlan, MigrationPlanStatus, PlanPhase, Route};
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Service};
use kube::api::{ListParams, Patch, PatchParams};
use kube::{Api, Client};
use json_patch::{AddOperation, PatchOperation};
use jsonptr::PointerBuf;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt::Debug;
use tracing::debug;

/// Default server-side-apply field manager
pub const DEFAULT_FIELD_MANAGER: &str = "migration-plan-controller";

/// JSON Patch replacing the whole plan status.
///
/// `add` on an existing member replaces it, so `found` entries and `output`
/// from earlier passes are dropped instead of merged.
pub fn status_patch(status: &MigrationPlanStatus) -> Result<json_patch::Patch, ClusterError> {
    Ok(json_patch::Patch(vec![PatchOperation::Add(AddOperation {
        path: PointerBuf::from_tokens(["status"]),
        value: serde_json::to_value(status)?,
    })]))
}

/// Cluster client talking to the Kubernetes API
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
    field_manager: String,
}

impl std::fmt::Debug for KubeClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClusterClient")
            .field("field_manager", &self.field_manager)
            .finish_non_exhaustive()
    }
}

impl KubeClusterClient {
    /// Wraps an existing kube client.
    pub fn new(client: Client, field_manager: impl Into<String>) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
        }
    }

    /// Builds a client from the in-cluster or kubeconfig environment.
    pub async fn try_default(field_manager: impl Into<String>) -> Result<Self, ClusterError> {
        let client = Client::try_default().await?;
        Ok(Self::new(client, field_manager))
    }

    async fn list_namespaced<K>(&self, namespace: &str) -> Result<Vec<K>, ClusterError>
    where
        K: kube::Resource<Scope = kube::core::NamespaceResourceScope>
            + Clone
            + DeserializeOwned
            + Debug,
        <K as kube::Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        debug!(
            kind = %K::kind(&Default::default()),
            namespace,
            count = list.items.len(),
            "listed objects"
        );
        Ok(list.items)
    }

    fn plans(&self, namespace: &str) -> Api<MigrationPlan> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait::async_trait]
impl ClusterClientTrait for KubeClusterClient {
    async fn list_deployment_configs(&self, namespace: &str) -> Result<Vec<DeploymentConfig>, ClusterError> {
        self.list_namespaced(namespace).await
    }

    async fn list_routes(&self, namespace: &str) -> Result<Vec<Route>, ClusterError> {
        self.list_namespaced(namespace).await
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClusterError> {
        self.list_namespaced(namespace).await
    }

    async fn list_persistent_volume_claims(&self, namespace: &str) -> Result<Vec<PersistentVolumeClaim>, ClusterError> {
        self.list_namespaced(namespace).await
    }

    async fn patch_plan_phase(&self, namespace: &str, name: &str, phase: PlanPhase) -> Result<(), ClusterError> {
        let patch = json!({ "status": { "phase": phase } });
        self.plans(namespace)
            .patch_status(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }

    async fn patch_plan_status(&self, namespace: &str, name: &str, status: &MigrationPlanStatus) -> Result<(), ClusterError> {
        let patch = status_patch(status)?;
        self.plans(namespace)
            .patch_status(name, &PatchParams::default(), &Patch::Json::<()>(patch))
            .await?;
        Ok(())
    }

    async fn apply_config_map(&self, config_map: &ConfigMap) -> Result<(), ClusterError> {
        let name = config_map
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| ClusterError::Api("ConfigMap is missing metadata.name".to_string()))?;
        let namespace = config_map
            .metadata
            .namespace
            .as_deref()
            .ok_or_else(|| ClusterError::Api("ConfigMap is missing metadata.namespace".to_string()))?;
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let pp = PatchParams::apply(&self.field_manager).force();
        api.patch(name, &pp, &Patch::Apply(config_map)).await?;
        Ok(())
    }
}
