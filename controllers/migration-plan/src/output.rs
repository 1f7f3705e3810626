//! Status & output writing.
//!
//! Renders the aggregated documents into one multi-document YAML bundle,
//! stores it in the output ConfigMap and then records the terminal phase on
//! the plan. The status only claims `Generated` after the bundle is stored.

use crate::aggregator::Aggregate;
use crate::deadline::with_deadline;
use crate::document::ManifestDocument;
use crate::error::ControllerError;
use crate::plan::ResolvedPlan;
use cluster_client::ClusterClientTrait;
use crds::{MigrationPlan, MigrationPlanStatus, PlanPhase};
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Resource;
use std::collections::BTreeMap;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Data key holding the rendered bundle
pub const OUTPUT_KEY: &str = "converted.yaml";
/// Separator written before every document
pub const DOCUMENT_SEPARATOR: &str = "---\n";

const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
const MANAGED_BY_VALUE: &str = "migration-plan-controller";

/// Concatenates the documents, each preceded by a separator.
/// Zero documents render as an empty string.
pub fn render(documents: &[ManifestDocument]) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    for document in documents {
        debug!(
            api_version = document.api_version(),
            kind = document.kind(),
            name = document.metadata().name.as_deref().unwrap_or_default(),
            "rendering document"
        );
        out.push_str(DOCUMENT_SEPARATOR);
        out.push_str(&document.to_yaml()?);
    }
    Ok(out)
}

/// Output ConfigMap for a plan, owned by the plan so it is garbage collected
/// together with it.
pub fn build_output_config_map(plan: &MigrationPlan, resolved: &ResolvedPlan, content: String) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(resolved.output_name.clone()),
            namespace: Some(resolved.namespace.clone()),
            labels: Some(BTreeMap::from([(
                MANAGED_BY_LABEL.to_string(),
                MANAGED_BY_VALUE.to_string(),
            )])),
            owner_references: plan.controller_owner_ref(&()).map(|owner| vec![owner]),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(OUTPUT_KEY.to_string(), content)])),
        ..Default::default()
    }
}

/// Writes the bundle, then the terminal status.
///
/// On success the status is `Generated` with `output` set. When rendering or
/// the ConfigMap write fails, the status becomes `Error` with a trailing note
/// and no `output`, and the failure is returned so the runtime requeues.
/// Cancellation returns before any status write.
pub async fn write_results(
    client: &dyn ClusterClientTrait,
    plan: &MigrationPlan,
    resolved: &ResolvedPlan,
    aggregate: Aggregate,
    deadline: Instant,
) -> Result<MigrationPlanStatus, ControllerError> {
    let Aggregate { documents, found, mut notes } = aggregate;

    let stored = store_bundle(client, plan, resolved, &documents, deadline).await;

    match stored {
        Ok(()) => {
            info!(
                "Wrote {} document(s) to ConfigMap {}/{}",
                documents.len(), resolved.namespace, resolved.output_name
            );
            let status = MigrationPlanStatus {
                phase: Some(PlanPhase::Generated),
                found,
                notes,
                output: Some(resolved.output_name.clone()),
            };
            write_status(client, plan, resolved, &status, deadline).await?;
            Ok(status)
        }
        Err(err @ ControllerError::Cancelled(_)) => Err(err),
        Err(err) => {
            error!("MigrationPlan {}/{}: {}", resolved.namespace, resolved.name, err);
            notes.push(err.to_string());
            let status = MigrationPlanStatus {
                phase: Some(PlanPhase::Error),
                found,
                notes,
                output: None,
            };
            write_status(client, plan, resolved, &status, deadline).await?;
            Err(err)
        }
    }
}

async fn store_bundle(
    client: &dyn ClusterClientTrait,
    plan: &MigrationPlan,
    resolved: &ResolvedPlan,
    documents: &[ManifestDocument],
    deadline: Instant,
) -> Result<(), ControllerError> {
    let content = render(documents)?;
    let config_map = build_output_config_map(plan, resolved, content);
    with_deadline(deadline, "output ConfigMap write", client.apply_config_map(&config_map))
        .await?
        .map_err(|source| ControllerError::OutputWrite {
            name: resolved.output_name.clone(),
            source,
        })
}

/// Patches the plan status unless it already holds exactly `status`.
async fn write_status(
    client: &dyn ClusterClientTrait,
    plan: &MigrationPlan,
    resolved: &ResolvedPlan,
    status: &MigrationPlanStatus,
    deadline: Instant,
) -> Result<(), ControllerError> {
    if plan.status.as_ref() == Some(status) {
        debug!("MigrationPlan {}/{} status unchanged", resolved.namespace, resolved.name);
        return Ok(());
    }

    with_deadline(
        deadline,
        "status write",
        client.patch_plan_status(&resolved.namespace, &resolved.name, status),
    )
    .await?
    .map_err(|e| {
        error!("Failed to update MigrationPlan {}/{} status: {}", resolved.namespace, resolved.name, e);
        ControllerError::StatusWrite(e)
    })?;
    if let Some(phase) = status.phase {
        info!("MigrationPlan {}/{} is now {}", resolved.namespace, resolved.name, phase);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::resolve;
    use crate::test_utils::*;
    use cluster_client::MockClusterClient;
    use k8s_openapi::api::core::v1::Service;
    use std::time::Duration;

    #[test]
    fn test_render_empty_is_empty_string() {
        assert_eq!(render(&[]).unwrap(), "");
    }

    #[test]
    fn test_render_prefixes_every_document_with_separator() {
        let docs = vec![
            ManifestDocument::Service(Service {
                metadata: ObjectMeta {
                    name: Some("a".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ManifestDocument::Service(Service {
                metadata: ObjectMeta {
                    name: Some("b".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            }),
        ];

        let rendered = render(&docs).unwrap();

        assert!(rendered.starts_with("---\napiVersion: v1\nkind: Service\n"));
        assert_eq!(rendered.matches(DOCUMENT_SEPARATOR).count(), 2);
        let a = rendered.find("name: a").unwrap();
        let b = rendered.find("name: b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_config_map_holds_bundle_under_single_key() {
        let mut plan = create_test_plan("demo", "apps", Default::default());
        plan.metadata.uid = Some("c0ffee".to_string());
        let resolved = resolve("demo", "apps", &plan.spec);

        let cm = build_output_config_map(&plan, &resolved, "---\nx: 1\n".to_string());

        assert_eq!(cm.metadata.name.as_deref(), Some("demo-output"));
        assert_eq!(cm.metadata.namespace.as_deref(), Some("apps"));
        let data = cm.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[OUTPUT_KEY], "---\nx: 1\n");
        let owners = cm.metadata.owner_references.unwrap();
        assert_eq!(owners[0].kind, "MigrationPlan");
        assert_eq!(owners[0].uid, "c0ffee");
        assert_eq!(owners[0].controller, Some(true));
    }

    #[tokio::test]
    async fn test_equal_status_is_not_written_again() {
        let mock = MockClusterClient::new();
        let mut plan = create_test_plan("demo", "apps", Default::default());
        let resolved = resolve("demo", "apps", &plan.spec);
        let deadline = Instant::now() + Duration::from_secs(5);
        let status = MigrationPlanStatus {
            phase: Some(PlanPhase::Generated),
            output: Some("demo-output".to_string()),
            ..Default::default()
        };

        write_status(&mock, &plan, &resolved, &status, deadline).await.unwrap();
        assert_eq!(mock.status_write_count(), 1);

        plan.status = mock.status("apps", "demo");
        write_status(&mock, &plan, &resolved, &status, deadline).await.unwrap();
        assert_eq!(mock.status_write_count(), 1);
    }
}
