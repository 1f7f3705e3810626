//! Test utilities for unit testing the reconciler
//!
//! This module provides helpers for creating plans and OpenShift source
//! objects with just enough fields for conversion.

use crds::*;
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, PersistentVolumeClaim, PersistentVolumeClaimSpec, PodSpec, PodTemplateSpec,
    Service, ServicePort, ServiceSpec, VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

fn meta(name: &str, namespace: &str, labels: &[(&str, &str)]) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        labels: (!labels.is_empty()).then(|| {
            labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }),
        ..Default::default()
    }
}

/// Helper to create a test MigrationPlan without status
pub fn create_test_plan(name: &str, namespace: &str, spec: MigrationPlanSpec) -> MigrationPlan {
    let mut plan = MigrationPlan::new(name, spec);
    plan.metadata.namespace = Some(namespace.to_string());
    plan
}

/// Helper to create a test DeploymentConfig with a one-container template
pub fn create_test_deployment_config(
    name: &str,
    namespace: &str,
    replicas: i32,
    selector: &[(&str, &str)],
) -> DeploymentConfig {
    let selector: BTreeMap<String, String> = selector
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let template = PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(selector.clone()),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![Container {
                name: name.to_string(),
                image: Some(format!("image-registry.openshift-image-registry.svc:5000/{namespace}/{name}:latest")),
                ports: Some(vec![ContainerPort {
                    container_port: 8080,
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            ..Default::default()
        }),
    };

    let mut dc = DeploymentConfig::new(
        name,
        DeploymentConfigSpec {
            replicas,
            selector,
            template: Some(template),
            triggers: Vec::new(),
        },
    );
    dc.metadata = meta(name, namespace, &[("app", name)]);
    dc
}

/// Helper to create a test Route pointing at a Service
pub fn create_test_route(
    name: &str,
    namespace: &str,
    host: Option<&str>,
    service: &str,
    target_port: Option<i32>,
) -> Route {
    let mut route = Route::new(
        name,
        RouteSpec {
            host: host.map(str::to_string),
            path: None,
            to: RouteTargetReference {
                kind: "Service".to_string(),
                name: service.to_string(),
                weight: Some(100),
            },
            port: target_port.map(|p| RoutePort {
                target_port: Some(IntOrString::Int(p)),
            }),
            tls: None,
        },
    );
    route.metadata = meta(name, namespace, &[("app", name)]);
    route
}

/// Helper to create a test ClusterIP Service
pub fn create_test_service(name: &str, namespace: &str) -> Service {
    Service {
        metadata: meta(name, namespace, &[("app", name)]),
        spec: Some(ServiceSpec {
            selector: Some(BTreeMap::from([("app".to_string(), name.to_string())])),
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                port: 80,
                target_port: Some(IntOrString::Int(8080)),
                ..Default::default()
            }]),
            type_: Some("ClusterIP".to_string()),
            ..Default::default()
        }),
        status: None,
    }
}

/// Helper to create a test 1Gi RWO claim
pub fn create_test_pvc(name: &str, namespace: &str, storage_class: Option<&str>) -> PersistentVolumeClaim {
    PersistentVolumeClaim {
        metadata: meta(name, namespace, &[("app", name)]),
        spec: Some(PersistentVolumeClaimSpec {
            access_modes: Some(vec!["ReadWriteOnce".to_string()]),
            storage_class_name: storage_class.map(str::to_string),
            resources: Some(VolumeResourceRequirements {
                requests: Some(BTreeMap::from([("storage".to_string(), Quantity("1Gi".to_string()))])),
                ..Default::default()
            }),
            ..Default::default()
        }),
        status: None,
    }
}
