//! MigrationPlan Controller
//!
//! Watches `MigrationPlan` resources and, for each plan, scans the selected
//! namespaces for OpenShift workloads (DeploymentConfigs, Routes, Services,
//! PersistentVolumeClaims), converts them to vanilla Kubernetes manifests and
//! stores the result as a multi-document YAML bundle in a ConfigMap next to
//! the plan.

mod aggregator;
mod backoff;
mod config;
mod controller;
mod converters;
mod deadline;
mod document;
mod error;
mod output;
mod plan;
mod reconciler;
mod scanner;
mod watcher;
#[cfg(test)]
mod test_utils;

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use controller::Controller;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting MigrationPlan Controller");

    let config = ControllerConfig::from_env()?;

    info!("Configuration:");
    info!("  Namespace: {}", config.watch_namespace.as_deref().unwrap_or("all namespaces"));
    info!("  Resync interval: {:?}", config.resync_interval);
    info!("  Pass timeout: {:?}", config.pass_timeout);
    info!("  Field manager: {}", config.field_manager);
    info!("  Error backoff: {}s..{}s", config.backoff_min_secs, config.backoff_max_secs);

    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
