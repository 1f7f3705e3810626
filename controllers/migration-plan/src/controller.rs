//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the Kubernetes
//! client, the cluster client and the plan watcher together.

use crate::backoff::BackoffTracker;
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::reconciler::PassSettings;
use crate::watcher::{Context, watch_plans};
use cluster_client::KubeClusterClient;
use crds::MigrationPlan;
use kube::{Api, Client};
use std::sync::Arc;
use tracing::info;

/// Main controller for MigrationPlan resources.
pub struct Controller {
    api: Api<MigrationPlan>,
    context: Arc<Context>,
}

impl Controller {
    /// Creates a new controller instance.
    pub async fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        info!("Initializing MigrationPlan Controller");

        let kube_client = Client::try_default().await?;
        let cluster_client = KubeClusterClient::new(kube_client.clone(), config.field_manager.clone());

        let api: Api<MigrationPlan> = match config.watch_namespace.as_deref() {
            Some(ns) => Api::namespaced(kube_client, ns),
            None => Api::all(kube_client),
        };

        let context = Arc::new(Context {
            client: Arc::new(cluster_client),
            settings: PassSettings {
                timeout: config.pass_timeout,
            },
            resync_interval: config.resync_interval,
            backoff: BackoffTracker::new(config.backoff_min_secs, config.backoff_max_secs),
        });

        Ok(Self { api, context })
    }

    /// Runs the controller until shutdown.
    pub async fn run(self) -> Result<(), ControllerError> {
        info!("MigrationPlan Controller running");
        watch_plans(self.api, self.context).await?;
        info!("MigrationPlan Controller shut down");
        Ok(())
    }
}
