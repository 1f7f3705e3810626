//! Rendered target-platform manifests.

use k8s_openapi::Resource;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// One manifest produced by a converter
///
/// Each variant is a typed vanilla Kubernetes object; apiVersion and kind
/// come from the type and are emitted first when serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestDocument {
    Deployment(Deployment),
    Ingress(Ingress),
    Service(Service),
    PersistentVolumeClaim(PersistentVolumeClaim),
}

impl ManifestDocument {
    pub fn api_version(&self) -> &'static str {
        match self {
            ManifestDocument::Deployment(_) => Deployment::API_VERSION,
            ManifestDocument::Ingress(_) => Ingress::API_VERSION,
            ManifestDocument::Service(_) => Service::API_VERSION,
            ManifestDocument::PersistentVolumeClaim(_) => PersistentVolumeClaim::API_VERSION,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ManifestDocument::Deployment(_) => Deployment::KIND,
            ManifestDocument::Ingress(_) => Ingress::KIND,
            ManifestDocument::Service(_) => Service::KIND,
            ManifestDocument::PersistentVolumeClaim(_) => PersistentVolumeClaim::KIND,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ManifestDocument::Deployment(d) => &d.metadata,
            ManifestDocument::Ingress(i) => &i.metadata,
            ManifestDocument::Service(s) => &s.metadata,
            ManifestDocument::PersistentVolumeClaim(p) => &p.metadata,
        }
    }

    /// Serializes the document as a single YAML document (no separator).
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        match self {
            ManifestDocument::Deployment(d) => serde_yaml::to_string(d),
            ManifestDocument::Ingress(i) => serde_yaml::to_string(i),
            ManifestDocument::Service(s) => serde_yaml::to_string(s),
            ManifestDocument::PersistentVolumeClaim(p) => serde_yaml::to_string(p),
        }
    }
}
