//! Cluster Client
//!
//! The narrow slice of the Kubernetes API the migration controller needs:
//! namespaced listing of the four source kinds, the `MigrationPlan` status
//! subresource, and create-or-replace of the output ConfigMap.
//!
//! # Example
//!
//! ```no_run
//! use cluster_client::{ClusterClientTrait, KubeClusterClient, DEFAULT_FIELD_MANAGER};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = KubeClusterClient::try_default(DEFAULT_FIELD_MANAGER).await?;
//!
//! let routes = client.list_routes("shop").await?;
//! println!("{} routes", routes.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
#[path = "trait.rs"]
pub mod cluster_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{KubeClusterClient, DEFAULT_FIELD_MANAGER, status_patch};
pub use cluster_trait::ClusterClientTrait;
pub use error::ClusterError;
#[cfg(feature = "test-util")]
pub use mock::MockClusterClient;
