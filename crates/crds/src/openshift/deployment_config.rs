//! DeploymentConfig (`apps.openshift.io/v1`)

use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize)]
#[kube(
    group = "apps.openshift.io",
    version = "v1",
    kind = "DeploymentConfig",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    /// Desired number of replicas
    #[serde(default)]
    pub replicas: i32,

    /// Plain label selector (not a LabelSelector)
    #[serde(default)]
    pub selector: BTreeMap<String, String>,

    /// Pod template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,

    /// Image/config change triggers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<DeploymentTriggerPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTriggerPolicy {
    /// Trigger type, "ImageChange" or "ConfigChange"
    #[serde(rename = "type", default)]
    pub type_: String,
}
