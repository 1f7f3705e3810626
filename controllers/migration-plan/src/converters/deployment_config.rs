//! DeploymentConfig -> Deployment

use super::{Conversion, carry_metadata, display_name};
use crate::document::ManifestDocument;
use crate::plan::ResolvedPlan;
use crds::DeploymentConfig;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

/// Maps a DeploymentConfig onto a Deployment.
///
/// Replicas and pod template are copied as-is. The plain selector map becomes
/// `matchLabels` verbatim, so an empty map stays an empty `matchLabels`.
pub fn convert(dc: &DeploymentConfig, _plan: &ResolvedPlan) -> Conversion {
    let name = display_name(&dc.metadata);
    let mut warnings = Vec::new();

    let template = match &dc.spec.template {
        Some(template) => template.clone(),
        None => {
            warnings.push(format!(
                "DeploymentConfig {name} has no pod template; Deployment template left empty"
            ));
            PodTemplateSpec::default()
        }
    };

    if !dc.spec.triggers.is_empty() {
        let types: Vec<&str> = dc.spec.triggers.iter().map(|t| t.type_.as_str()).collect();
        warnings.push(format!(
            "DeploymentConfig {name} triggers ({}) have no Deployment equivalent and were dropped",
            types.join(", ")
        ));
    }

    let deployment = Deployment {
        metadata: carry_metadata(&dc.metadata),
        spec: Some(DeploymentSpec {
            replicas: Some(dc.spec.replicas),
            selector: LabelSelector {
                match_labels: Some(dc.spec.selector.clone()),
                match_expressions: None,
            },
            template,
            ..Default::default()
        }),
        status: None,
    };

    Conversion {
        document: ManifestDocument::Deployment(deployment),
        note: format!("Converted DeploymentConfig {name} → Deployment"),
        warnings,
    }
}
