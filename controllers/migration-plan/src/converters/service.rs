//! Service -> Service

use super::{Conversion, carry_metadata, display_name};
use crate::document::ManifestDocument;
use crate::plan::ResolvedPlan;
use k8s_openapi::api::core::v1::Service;

/// Structural copy: identity, labels and the full spec (ports, selector, type).
pub fn convert(svc: &Service, _plan: &ResolvedPlan) -> Conversion {
    let service = Service {
        metadata: carry_metadata(&svc.metadata),
        spec: svc.spec.clone(),
        status: None,
    };

    Conversion {
        document: ManifestDocument::Service(service),
        note: format!("Processed Service {}", display_name(&svc.metadata)),
        warnings: Vec::new(),
    }
}
