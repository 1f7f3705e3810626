//! Route -> Ingress
//!
//! Emits one host rule with a single `/` prefix path. Multiple route rules,
//! TLS termination and path-based routing are not converted; they surface as
//! notes instead.

use super::{Conversion, display_name};
use crate::document::ManifestDocument;
use crate::plan::ResolvedPlan;
use crds::Route;
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule, IngressServiceBackend,
    IngressSpec, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

/// Annotation advertising the ingress class
pub const INGRESS_CLASS_ANNOTATION: &str = "kubernetes.io/ingress.class";
/// Class used when the plan gives no hint
pub const DEFAULT_INGRESS_CLASS: &str = "nginx";

const ROOT_PATH: &str = "/";
const PREFIX_PATH_TYPE: &str = "Prefix";

/// Maps a Route onto an Ingress.
///
/// A route without host or target port still converts; the missing field is
/// left empty in the Ingress and a note records the gap.
pub fn convert(route: &Route, plan: &ResolvedPlan) -> Conversion {
    let name = display_name(&route.metadata);
    let class = plan.ingress_class.as_deref().unwrap_or(DEFAULT_INGRESS_CLASS);
    let mut warnings = Vec::new();

    let host = route.spec.host.clone().filter(|h| !h.is_empty());
    if host.is_none() {
        warnings.push(format!("Route {name} has no host; Ingress rule host left empty"));
    }

    let port = match route.spec.port.as_ref().and_then(|p| p.target_port.as_ref()) {
        Some(IntOrString::Int(number)) => ServiceBackendPort {
            number: Some(*number),
            name: None,
        },
        Some(IntOrString::String(value)) => match value.parse::<i32>() {
            Ok(number) => ServiceBackendPort {
                number: Some(number),
                name: None,
            },
            Err(_) => {
                warnings.push(format!(
                    "Route {name} targets named port {value}; Ingress backend uses the port name"
                ));
                ServiceBackendPort {
                    number: None,
                    name: Some(value.clone()),
                }
            }
        },
        None => {
            warnings.push(format!("Route {name} has no target port; Ingress backend port left empty"));
            ServiceBackendPort::default()
        }
    };

    let target = &route.spec.to;
    if !target.kind.is_empty() && target.kind != "Service" {
        warnings.push(format!(
            "Route {name} points at {} {}, not a Service; backend kept as a service reference",
            target.kind, target.name
        ));
    }
    if let Some(path) = route.spec.path.as_deref().filter(|p| !p.is_empty() && *p != ROOT_PATH) {
        warnings.push(format!("Route {name} path {path} not converted; Ingress serves prefix /"));
    }
    if let Some(tls) = &route.spec.tls {
        warnings.push(format!(
            "Route {name} uses {} TLS termination; TLS not converted",
            if tls.termination.is_empty() { "unspecified" } else { tls.termination.as_str() }
        ));
    }

    let ingress = Ingress {
        metadata: ObjectMeta {
            name: route.metadata.name.clone(),
            namespace: route.metadata.namespace.clone(),
            annotations: Some(BTreeMap::from([(
                INGRESS_CLASS_ANNOTATION.to_string(),
                class.to_string(),
            )])),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            rules: Some(vec![IngressRule {
                host,
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some(ROOT_PATH.to_string()),
                        path_type: PREFIX_PATH_TYPE.to_string(),
                        backend: IngressBackend {
                            service: Some(IngressServiceBackend {
                                name: target.name.clone(),
                                port: Some(port),
                            }),
                            resource: None,
                        },
                    }],
                }),
            }]),
            ..Default::default()
        }),
        status: None,
    };

    Conversion {
        document: ManifestDocument::Ingress(ingress),
        note: format!("Converted Route {name} → Ingress (class {class})"),
        warnings,
    }
}
