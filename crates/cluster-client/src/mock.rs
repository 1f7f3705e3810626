//! Mock ClusterClient for unit testing
//!
//! Stores source objects, plan statuses and ConfigMaps in memory. Failures
//! can be injected per (kind, namespace) listing, for status writes and for
//! ConfigMap writes; listing can also be made to hang forever so callers can
//! exercise their deadlines.

use crate::cluster_trait::ClusterClientTrait;
use crate::error::ClusterError;
use crds::{DeploymentConfig, MigrationPlanStatus, PlanPhase, Route};
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Service};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Kind key used by [`MockClusterClient::fail_list`] for DeploymentConfigs
pub const DEPLOYMENT_CONFIGS: &str = "deploymentconfigs";
/// Kind key used by [`MockClusterClient::fail_list`] for Routes
pub const ROUTES: &str = "routes";
/// Kind key used by [`MockClusterClient::fail_list`] for Services
pub const SERVICES: &str = "services";
/// Kind key used by [`MockClusterClient::fail_list`] for PersistentVolumeClaims
pub const PERSISTENT_VOLUME_CLAIMS: &str = "persistentvolumeclaims";

type Key = (String, String);

/// Mock cluster for testing
#[derive(Clone, Debug, Default)]
pub struct MockClusterClient {
    // In-memory source objects, keyed by namespace, in listing order
    pub(crate) deployment_configs: Arc<Mutex<HashMap<String, Vec<DeploymentConfig>>>>,
    pub(crate) routes: Arc<Mutex<HashMap<String, Vec<Route>>>>,
    pub(crate) services: Arc<Mutex<HashMap<String, Vec<Service>>>>,
    pub(crate) pvcs: Arc<Mutex<HashMap<String, Vec<PersistentVolumeClaim>>>>,
    // Written state
    pub(crate) statuses: Arc<Mutex<HashMap<Key, MigrationPlanStatus>>>,
    pub(crate) config_maps: Arc<Mutex<HashMap<Key, ConfigMap>>>,
    pub(crate) status_writes: Arc<Mutex<usize>>,
    pub(crate) config_map_writes: Arc<Mutex<usize>>,
    // Injected failures
    pub(crate) list_failures: Arc<Mutex<HashMap<Key, String>>>,
    pub(crate) status_failure: Arc<Mutex<Option<String>>>,
    pub(crate) output_failure: Arc<Mutex<Option<String>>>,
    pub(crate) hang_lists: Arc<Mutex<bool>>,
}

fn namespace_of(meta: &k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta) -> String {
    meta.namespace.clone().unwrap_or_else(|| "default".to_string())
}

impl MockClusterClient {
    /// Create an empty mock cluster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a DeploymentConfig (listed in insertion order)
    pub fn add_deployment_config(&self, dc: DeploymentConfig) {
        let ns = namespace_of(&dc.metadata);
        self.deployment_configs.lock().unwrap().entry(ns).or_default().push(dc);
    }

    /// Add a Route (listed in insertion order)
    pub fn add_route(&self, route: Route) {
        let ns = namespace_of(&route.metadata);
        self.routes.lock().unwrap().entry(ns).or_default().push(route);
    }

    /// Add a Service (listed in insertion order)
    pub fn add_service(&self, svc: Service) {
        let ns = namespace_of(&svc.metadata);
        self.services.lock().unwrap().entry(ns).or_default().push(svc);
    }

    /// Add a PersistentVolumeClaim (listed in insertion order)
    pub fn add_persistent_volume_claim(&self, pvc: PersistentVolumeClaim) {
        let ns = namespace_of(&pvc.metadata);
        self.pvcs.lock().unwrap().entry(ns).or_default().push(pvc);
    }

    /// Make listing `kind` (one of the kind key constants) in `namespace` fail
    pub fn fail_list(&self, kind: &str, namespace: &str, message: &str) {
        self.list_failures
            .lock()
            .unwrap()
            .insert((kind.to_string(), namespace.to_string()), message.to_string());
    }

    /// Make every status write fail
    pub fn fail_status_writes(&self, message: &str) {
        *self.status_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make every ConfigMap write fail
    pub fn fail_output_writes(&self, message: &str) {
        *self.output_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make every list call block forever
    pub fn hang_lists(&self) {
        *self.hang_lists.lock().unwrap() = true;
    }

    /// Seed a stored plan status
    pub fn set_status(&self, namespace: &str, name: &str, status: MigrationPlanStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), status);
    }

    /// Stored plan status, if any was written
    pub fn status(&self, namespace: &str, name: &str) -> Option<MigrationPlanStatus> {
        self.statuses
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Stored ConfigMap, if any was written
    pub fn config_map(&self, namespace: &str, name: &str) -> Option<ConfigMap> {
        self.config_maps
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Number of successful status patches (phase-only and full)
    pub fn status_write_count(&self) -> usize {
        *self.status_writes.lock().unwrap()
    }

    /// Number of successful ConfigMap writes
    pub fn config_map_write_count(&self) -> usize {
        *self.config_map_writes.lock().unwrap()
    }

    async fn check_list(&self, kind: &str, namespace: &str) -> Result<(), ClusterError> {
        let hang = *self.hang_lists.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
        let failure = self
            .list_failures
            .lock()
            .unwrap()
            .get(&(kind.to_string(), namespace.to_string()))
            .cloned();
        match failure {
            Some(message) => Err(ClusterError::Api(message)),
            None => Ok(()),
        }
    }

    fn check_status_write(&self) -> Result<(), ClusterError> {
        match self.status_failure.lock().unwrap().clone() {
            Some(message) => Err(ClusterError::Api(message)),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ClusterClientTrait for MockClusterClient {
    async fn list_deployment_configs(&self, namespace: &str) -> Result<Vec<DeploymentConfig>, ClusterError> {
        self.check_list(DEPLOYMENT_CONFIGS, namespace).await?;
        Ok(self.deployment_configs.lock().unwrap().get(namespace).cloned().unwrap_or_default())
    }

    async fn list_routes(&self, namespace: &str) -> Result<Vec<Route>, ClusterError> {
        self.check_list(ROUTES, namespace).await?;
        Ok(self.routes.lock().unwrap().get(namespace).cloned().unwrap_or_default())
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClusterError> {
        self.check_list(SERVICES, namespace).await?;
        Ok(self.services.lock().unwrap().get(namespace).cloned().unwrap_or_default())
    }

    async fn list_persistent_volume_claims(&self, namespace: &str) -> Result<Vec<PersistentVolumeClaim>, ClusterError> {
        self.check_list(PERSISTENT_VOLUME_CLAIMS, namespace).await?;
        Ok(self.pvcs.lock().unwrap().get(namespace).cloned().unwrap_or_default())
    }

    async fn patch_plan_phase(&self, namespace: &str, name: &str, phase: PlanPhase) -> Result<(), ClusterError> {
        self.check_status_write()?;
        self.statuses
            .lock()
            .unwrap()
            .entry((namespace.to_string(), name.to_string()))
            .or_default()
            .phase = Some(phase);
        *self.status_writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn patch_plan_status(&self, namespace: &str, name: &str, status: &MigrationPlanStatus) -> Result<(), ClusterError> {
        self.check_status_write()?;
        // Whole-status replacement, same as the JSON Patch the live client sends
        self.statuses
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), status.clone());
        *self.status_writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn apply_config_map(&self, config_map: &ConfigMap) -> Result<(), ClusterError> {
        if let Some(message) = self.output_failure.lock().unwrap().clone() {
            return Err(ClusterError::Api(message));
        }
        let name = config_map
            .metadata
            .name
            .clone()
            .ok_or_else(|| ClusterError::Api("ConfigMap is missing metadata.name".to_string()))?;
        let namespace = namespace_of(&config_map.metadata);
        self.config_maps
            .lock()
            .unwrap()
            .insert((namespace, name), config_map.clone());
        *self.config_map_writes.lock().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn service(name: &str, namespace: &str) -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_lists_are_scoped_by_namespace_in_insertion_order() {
        let mock = MockClusterClient::new();
        mock.add_service(service("b", "ns1"));
        mock.add_service(service("a", "ns1"));
        mock.add_service(service("c", "ns2"));

        let names: Vec<_> = mock
            .list_services("ns1")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.metadata.name.unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(mock.list_services("ns3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_only_hits_matching_pair() {
        let mock = MockClusterClient::new();
        mock.add_service(service("web", "ns1"));
        mock.fail_list(ROUTES, "ns1", "boom");

        assert!(mock.list_routes("ns1").await.is_err());
        assert!(mock.list_routes("ns2").await.is_ok());
        assert_eq!(mock.list_services("ns1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_phase_patch_keeps_other_fields() {
        let mock = MockClusterClient::new();
        let mut status = MigrationPlanStatus::default();
        status.notes.push("kept".to_string());
        mock.set_status("ns", "plan", status);

        mock.patch_plan_phase("ns", "plan", PlanPhase::Scanning).await.unwrap();

        let stored = mock.status("ns", "plan").unwrap();
        assert_eq!(stored.phase, Some(PlanPhase::Scanning));
        assert_eq!(stored.notes, vec!["kept".to_string()]);
        assert_eq!(mock.status_write_count(), 1);
    }

    #[tokio::test]
    async fn test_status_patch_replaces_found_wholesale() {
        let mock = MockClusterClient::new();
        let mut first = MigrationPlanStatus::default();
        first.found.insert(DEPLOYMENT_CONFIGS.to_string(), 3);
        first.found.insert(ROUTES.to_string(), 1);
        first.output = Some("demo-output".to_string());
        mock.patch_plan_status("ns", "plan", &first).await.unwrap();

        let mut second = MigrationPlanStatus::default();
        second.found.insert(DEPLOYMENT_CONFIGS.to_string(), 3);
        mock.patch_plan_status("ns", "plan", &second).await.unwrap();

        assert_eq!(mock.status("ns", "plan"), Some(second));
    }
}
