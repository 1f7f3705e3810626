//! Reconciliation logic for MigrationPlan CRDs.
//!
//! One pass runs Resolver -> Scanner -> Converters -> Aggregator -> Writer.
//! The pass is independent of the controller runtime: it takes the plan and
//! a cluster client and reports the status it left behind, so it can be
//! exercised against `MockClusterClient`.

use crate::aggregator::aggregate;
use crate::converters::{ConversionResult, convert_objects};
use crate::deadline::with_deadline;
use crate::error::{ControllerError, ListError};
use crate::output::write_results;
use crate::plan::resolve;
use crate::scanner::scan;
use cluster_client::ClusterClientTrait;
use crds::{MigrationPlan, MigrationPlanStatus, PlanPhase};
use futures::future::join_all;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Per-pass limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSettings {
    /// Upper bound for all cluster calls of one pass together
    pub timeout: Duration,
}

/// Runs one reconcile pass for `plan`.
///
/// Phase transitions:
/// - a plan without status is first marked `Scanning`
/// - success ends in `Generated` with `output` set
/// - a failed bundle write ends in `Error`, keeping the notes gathered so far
///
/// Listing failures never end the pass; they only add notes. Status write
/// failures and cancellation return an error without a new terminal phase.
pub async fn reconcile_plan(
    plan: &MigrationPlan,
    client: &dyn ClusterClientTrait,
    settings: &PassSettings,
) -> Result<MigrationPlanStatus, ControllerError> {
    let deadline = Instant::now() + settings.timeout;
    let name = plan
        .metadata
        .name
        .as_deref()
        .ok_or(ControllerError::MissingMetadata("metadata.name"))?;
    let namespace = plan
        .metadata
        .namespace
        .as_deref()
        .ok_or(ControllerError::MissingMetadata("metadata.namespace"))?;

    info!("Reconciling MigrationPlan {}/{}", namespace, name);

    let resolved = resolve(name, namespace, &plan.spec);

    // Only a plan without status is marked Scanning. Writing it on every pass
    // would change the status each time and retrigger the watch endlessly.
    if plan.status.is_none() {
        with_deadline(
            deadline,
            "status write",
            client.patch_plan_phase(namespace, name, PlanPhase::Scanning),
        )
        .await?
        .map_err(ControllerError::StatusWrite)?;
    }

    // join_all yields results in input order, so merge order stays
    // namespace -> kind -> listing order however the scans interleave.
    let scans = resolved.scan_pairs().into_iter().map(|(ns, kind)| {
        let resolved = &resolved;
        async move {
            let objects = scan(client, kind, ns).await?;
            Ok::<ConversionResult, ListError>(convert_objects(&objects, ns, resolved))
        }
    });
    let results = with_deadline(deadline, "resource scan", join_all(scans)).await?;

    let merged = aggregate(&resolved, results);
    info!(
        "MigrationPlan {}/{}: {} document(s), found {:?}",
        namespace,
        name,
        merged.documents.len(),
        merged.found
    );

    write_results(client, plan, &resolved, merged, deadline).await
}

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod reconciler_test;
