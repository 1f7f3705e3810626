//! Resource scanning.
//!
//! Lists the live objects of one source kind in one namespace. Read-only;
//! every pass re-scans, nothing is cached between passes.

use crate::error::ListError;
use crate::plan::SourceKind;
use cluster_client::{ClusterClientTrait, ClusterError};
use crds::{DeploymentConfig, Route};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Service};
use tracing::{debug, warn};

/// Objects returned by one scan, tagged by kind
#[derive(Debug, Clone)]
pub enum SourceObjects {
    DeploymentConfigs(Vec<DeploymentConfig>),
    Routes(Vec<Route>),
    Services(Vec<Service>),
    PersistentVolumeClaims(Vec<PersistentVolumeClaim>),
}

impl SourceObjects {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceObjects::DeploymentConfigs(_) => SourceKind::DeploymentConfigs,
            SourceObjects::Routes(_) => SourceKind::Routes,
            SourceObjects::Services(_) => SourceKind::Services,
            SourceObjects::PersistentVolumeClaims(_) => SourceKind::PersistentVolumeClaims,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SourceObjects::DeploymentConfigs(items) => items.len(),
            SourceObjects::Routes(items) => items.len(),
            SourceObjects::Services(items) => items.len(),
            SourceObjects::PersistentVolumeClaims(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lists all objects of `kind` in `namespace`.
pub async fn scan(
    client: &dyn ClusterClientTrait,
    kind: SourceKind,
    namespace: &str,
) -> Result<SourceObjects, ListError> {
    let listed: Result<SourceObjects, ClusterError> = match kind {
        SourceKind::DeploymentConfigs => client
            .list_deployment_configs(namespace)
            .await
            .map(SourceObjects::DeploymentConfigs),
        SourceKind::Routes => client.list_routes(namespace).await.map(SourceObjects::Routes),
        SourceKind::Services => client.list_services(namespace).await.map(SourceObjects::Services),
        SourceKind::PersistentVolumeClaims => client
            .list_persistent_volume_claims(namespace)
            .await
            .map(SourceObjects::PersistentVolumeClaims),
    };

    match listed {
        Ok(objects) => {
            if objects.is_empty() {
                debug!(kind = kind.key(), namespace, "no objects found");
            } else {
                debug!(kind = kind.key(), namespace, count = objects.len(), "scanned");
            }
            Ok(objects)
        }
        Err(source) => {
            let err = ListError {
                kind: kind.display_name(),
                namespace: namespace.to_string(),
                source,
            };
            warn!("{}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use cluster_client::MockClusterClient;
    use cluster_client::mock::ROUTES;

    #[tokio::test]
    async fn test_scan_lists_requested_kind_only() {
        let mock = MockClusterClient::new();
        mock.add_deployment_config(create_test_deployment_config("web", "ns1", 2, &[("app", "web")]));
        mock.add_route(create_test_route("web", "ns1", Some("web.example.com"), "web", Some(8080)));

        let objects = scan(&mock, SourceKind::DeploymentConfigs, "ns1").await.unwrap();
        assert_eq!(objects.kind(), SourceKind::DeploymentConfigs);
        assert_eq!(objects.len(), 1);

        let objects = scan(&mock, SourceKind::Services, "ns1").await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_scan_failure_names_kind_and_namespace() {
        let mock = MockClusterClient::new();
        mock.fail_list(ROUTES, "ns1", "forbidden");

        let err = scan(&mock, SourceKind::Routes, "ns1").await.unwrap_err();
        assert_eq!(err.kind, "Routes");
        assert_eq!(err.namespace, "ns1");
        assert!(err.to_string().starts_with("error listing Routes in namespace ns1:"));
        assert!(err.to_string().contains("forbidden"));
    }
}
