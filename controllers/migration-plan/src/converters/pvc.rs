//! PersistentVolumeClaim -> PersistentVolumeClaim

use super::{Conversion, carry_metadata, display_name};
use crate::document::ManifestDocument;
use crate::plan::ResolvedPlan;
use crds::TargetCloud;
use k8s_openapi::api::core::v1::PersistentVolumeClaim;

/// Storage class every claim gets on EKS
pub const EKS_STORAGE_CLASS: &str = "gp3";

/// Structural copy of the claim. On `eks` the storage class is forced to
/// `gp3`; every other target keeps the source class.
pub fn convert(pvc: &PersistentVolumeClaim, plan: &ResolvedPlan) -> Conversion {
    let name = display_name(&pvc.metadata);
    let mut spec = pvc.spec.clone();
    let source_class = pvc
        .spec
        .as_ref()
        .and_then(|s| s.storage_class_name.clone())
        .unwrap_or_else(|| "<default>".to_string());

    let note = if plan.target_cloud == TargetCloud::Eks {
        spec.get_or_insert_with(Default::default).storage_class_name = Some(EKS_STORAGE_CLASS.to_string());
        format!(
            "Processed PVC {name} (storageClassName {source_class} → {EKS_STORAGE_CLASS} for {})",
            plan.target_cloud
        )
    } else {
        format!(
            "Processed PVC {name} (storageClassName {source_class} kept for {})",
            plan.target_cloud
        )
    };

    let claim = PersistentVolumeClaim {
        metadata: carry_metadata(&pvc.metadata),
        spec,
        status: None,
    };

    Conversion {
        document: ManifestDocument::PersistentVolumeClaim(claim),
        note,
        warnings: Vec::new(),
    }
}
