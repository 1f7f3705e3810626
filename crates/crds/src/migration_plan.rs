//! MigrationPlan CRD
//!
//! Declares which OpenShift namespaces and resource kinds should be rendered
//! as vanilla Kubernetes manifests, and where the rendered bundle goes.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "migrate.migrate.dev",
    version = "v1",
    kind = "MigrationPlan",
    namespaced,
    status = "MigrationPlanStatus",
    shortname = "mplan",
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Output","type":"string","jsonPath":".status.output"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlanSpec {
    /// Namespaces in the source OpenShift cluster to scan.
    /// Defaults to the plan's own namespace when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,

    /// Resource kinds to include (case-insensitive),
    /// e.g. `["deploymentconfigs", "routes", "services", "pvcs"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Target cloud, guides small deltas in the output
    #[serde(default)]
    pub target_cloud: TargetCloud,

    /// Ingress class hint for Route -> Ingress conversion
    /// (e.g. "alb", "azure/application-gateway", "gce", "nginx")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_class: Option<String>,

    /// ConfigMap (same namespace) receiving `data["converted.yaml"]`.
    /// Defaults to `<plan name>-output`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_config_map: Option<String>,
}

/// Target platform for the rendered manifests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetCloud {
    /// Amazon EKS
    Eks,

    /// Azure AKS
    Aks,

    /// Google GKE
    Gke,

    /// Any conformant Kubernetes distribution
    #[default]
    Vanilla,
}

impl TargetCloud {
    /// Lowercase name as it appears in the plan spec
    pub fn as_str(self) -> &'static str {
        match self {
            TargetCloud::Eks => "eks",
            TargetCloud::Aks => "aks",
            TargetCloud::Gke => "gke",
            TargetCloud::Vanilla => "vanilla",
        }
    }
}

impl fmt::Display for TargetCloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlanStatus {
    /// Processing phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<PlanPhase>,

    /// Discovered resource counts by kind,
    /// e.g. `{"deploymentconfigs": 1, "routes": 1}`
    #[serde(default)]
    pub found: BTreeMap<String, i32>,

    /// Notes and warnings for the user (e.g. "PVC RWO -> EBS (gp3)")
    #[serde(default)]
    pub notes: Vec<String>,

    /// ConfigMap name actually used for output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Coarse-grained processing state of a plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum PlanPhase {
    /// A pass is in progress
    Scanning,

    /// The last pass rendered and stored the manifest bundle
    Generated,

    /// The last pass failed
    Error,
}

impl fmt::Display for PlanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanPhase::Scanning => "Scanning",
            PlanPhase::Generated => "Generated",
            PlanPhase::Error => "Error",
        };
        f.write_str(s)
    }
}
