//! Kind converters.
//!
//! One pure mapping per source kind, dispatched by [`SourceObjects`] variant.
//! Converters read the source object and the resolved plan only: they never
//! mutate the source and never talk to the cluster. Adding a kind pair means
//! a new module here plus a new arm in [`convert_objects`].

pub mod deployment_config;
pub mod pvc;
pub mod route;
pub mod service;

use crate::document::ManifestDocument;
use crate::plan::{ResolvedPlan, SourceKind};
use crate::scanner::SourceObjects;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Output of converting a single source object
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: ManifestDocument,
    /// One-line summary of the transform
    pub note: String,
    /// Gaps the operator should look at; never affect control flow
    pub warnings: Vec<String>,
}

/// Converted output of one (kind, namespace) scan
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub kind: SourceKind,
    pub namespace: String,
    /// Documents in source listing order
    pub documents: Vec<ManifestDocument>,
    /// Number of source objects observed
    pub count: usize,
    pub notes: Vec<String>,
}

/// Converts every object of one scan, preserving listing order.
pub fn convert_objects(objects: &SourceObjects, namespace: &str, plan: &ResolvedPlan) -> ConversionResult {
    let conversions: Vec<Conversion> = match objects {
        SourceObjects::DeploymentConfigs(items) => {
            items.iter().map(|dc| deployment_config::convert(dc, plan)).collect()
        }
        SourceObjects::Routes(items) => items.iter().map(|rt| route::convert(rt, plan)).collect(),
        SourceObjects::Services(items) => items.iter().map(|svc| service::convert(svc, plan)).collect(),
        SourceObjects::PersistentVolumeClaims(items) => {
            items.iter().map(|pvc| pvc::convert(pvc, plan)).collect()
        }
    };

    let mut result = ConversionResult {
        kind: objects.kind(),
        namespace: namespace.to_string(),
        documents: Vec::with_capacity(conversions.len()),
        count: objects.len(),
        notes: Vec::new(),
    };
    for conversion in conversions {
        result.documents.push(conversion.document);
        result.notes.push(conversion.note);
        result.notes.extend(conversion.warnings);
    }
    result
}

/// Target metadata carrying only identity and labels from the source.
///
/// Server-populated fields (uid, resourceVersion, managedFields, ...) and
/// annotations stay behind.
pub(crate) fn carry_metadata(source: &ObjectMeta) -> ObjectMeta {
    ObjectMeta {
        name: source.name.clone(),
        namespace: source.namespace.clone(),
        labels: source.labels.clone(),
        ..Default::default()
    }
}

/// Name for notes, tolerant of unnamed objects
pub(crate) fn display_name(meta: &ObjectMeta) -> &str {
    meta.name.as_deref().unwrap_or("<unnamed>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::resolve;
    use crate::test_utils::*;
    use crds::MigrationPlanSpec;
    use std::collections::BTreeMap;

    #[test]
    fn test_carry_metadata_drops_server_fields() {
        let source = ObjectMeta {
            name: Some("web".to_string()),
            namespace: Some("shop".to_string()),
            labels: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
            annotations: Some(BTreeMap::from([("openshift.io/host.generated".to_string(), "true".to_string())])),
            uid: Some("1234".to_string()),
            resource_version: Some("99".to_string()),
            ..Default::default()
        };
        let target = carry_metadata(&source);
        assert_eq!(target.name, source.name);
        assert_eq!(target.namespace, source.namespace);
        assert_eq!(target.labels, source.labels);
        assert_eq!(target.annotations, None);
        assert_eq!(target.uid, None);
        assert_eq!(target.resource_version, None);
    }

    #[test]
    fn test_convert_objects_keeps_listing_order() {
        let plan = resolve("demo", "shop", &MigrationPlanSpec::default());
        let objects = SourceObjects::Services(vec![
            create_test_service("zeta", "shop"),
            create_test_service("alpha", "shop"),
        ]);

        let result = convert_objects(&objects, "shop", &plan);

        assert_eq!(result.kind, SourceKind::Services);
        assert_eq!(result.count, 2);
        let names: Vec<_> = result
            .documents
            .iter()
            .map(|d| d.metadata().name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(result.notes, vec!["Processed Service zeta", "Processed Service alpha"]);
    }
}
