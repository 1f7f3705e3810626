//! Route (`route.openshift.io/v1`)

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize)]
#[kube(
    group = "route.openshift.io",
    version = "v1",
    kind = "Route",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    /// Externally reachable host name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Path restriction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Backend the route points to
    #[serde(default)]
    pub to: RouteTargetReference,

    /// Target port on the backend service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<RoutePort>,

    /// TLS termination settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteTargetReference {
    /// Referenced kind, normally "Service"
    #[serde(default)]
    pub kind: String,

    /// Name of the referenced object
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutePort {
    /// Port number or named port on the target service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    /// "edge", "passthrough" or "reencrypt"
    #[serde(default)]
    pub termination: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_edge_termination_policy: Option<String>,
}
