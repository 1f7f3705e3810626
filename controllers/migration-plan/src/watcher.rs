//! MigrationPlan watcher.
//!
//! Drives reconcile passes through `kube_runtime::Controller`, which handles
//! reconnection, per-object queuing and requeue timers. Successful passes
//! requeue after the resync interval so cluster drift is picked up without
//! plan edits; failed passes requeue with per-plan Fibonacci backoff.

use crate::backoff::BackoffTracker;
use crate::error::ControllerError;
use crate::reconciler::{PassSettings, reconcile_plan};
use cluster_client::ClusterClientTrait;
use crds::MigrationPlan;
use futures::StreamExt;
use kube::{Api, ResourceExt};
use kube_runtime::{
    Controller, watcher,
    controller::{Action, Config as RuntimeConfig, Error as RuntimeError},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Shared state handed to every reconcile call
pub struct Context {
    pub client: Arc<dyn ClusterClientTrait>,
    pub settings: PassSettings,
    pub resync_interval: Duration,
    pub backoff: BackoffTracker,
}

fn key_for(namespace: Option<&str>, name: &str) -> String {
    format!("{}/{}", namespace.unwrap_or_default(), name)
}

fn plan_key(plan: &MigrationPlan) -> String {
    key_for(plan.namespace().as_deref(), &plan.name_any())
}

/// Drops the backoff history of a plan that no longer exists.
///
/// A failing plan always has a requeue pending; once it is deleted the
/// runtime reports that requeue as `ObjectNotFound` instead of reconciling.
fn forget_plan(ctx: &Context, namespace: Option<&str>, name: &str) {
    let key = key_for(namespace, name);
    debug!("MigrationPlan {} is gone, dropping its backoff state", key);
    ctx.backoff.reset(&key);
}

async fn reconcile(plan: Arc<MigrationPlan>, ctx: Arc<Context>) -> Result<Action, ControllerError> {
    let key = plan_key(&plan);
    debug!("Reconciling MigrationPlan {}", key);

    let status = reconcile_plan(&plan, ctx.client.as_ref(), &ctx.settings).await?;
    ctx.backoff.reset(&key);

    debug!(
        "MigrationPlan {} is {:?}, next resync in {:?}",
        key, status.phase, ctx.resync_interval
    );
    Ok(Action::requeue(ctx.resync_interval))
}

fn error_policy(plan: Arc<MigrationPlan>, err: &ControllerError, ctx: Arc<Context>) -> Action {
    let key = plan_key(&plan);
    let delay = ctx.backoff.next_delay(&key);
    match err {
        ControllerError::Cancelled(_) => warn!("Reconcile of MigrationPlan {} cancelled, retrying in {:?}: {}", key, delay, err),
        _ => error!("Reconciliation error for MigrationPlan {}, retrying in {:?}: {}", key, delay, err),
    }
    Action::requeue(delay)
}

/// Watches MigrationPlans until a termination signal arrives.
pub async fn watch_plans(api: Api<MigrationPlan>, ctx: Arc<Context>) -> Result<(), ControllerError> {
    info!("Starting MigrationPlan watcher");

    // Status writes emit watch events too; debounce folds them into one pass
    let runtime_config = RuntimeConfig::default()
        .debounce(Duration::from_secs(1))
        .concurrency(4);

    Controller::new(api, watcher::Config::default())
        .with_config(runtime_config)
        .shutdown_on_signal()
        .run(reconcile, error_policy, Arc::clone(&ctx))
        .for_each(|res| {
            let ctx = Arc::clone(&ctx);
            async move {
                match res {
                    Ok((obj, _action)) => debug!("Reconciled MigrationPlan {}", obj),
                    Err(RuntimeError::ObjectNotFound(obj)) => {
                        forget_plan(&ctx, obj.namespace.as_deref(), &obj.name);
                    }
                    Err(e) => error!("Controller error for MigrationPlan: {}", e),
                }
            }
        })
        .await;

    info!("MigrationPlan watcher stopped");
    Ok(())
}
