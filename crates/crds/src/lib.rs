//! Migration CRD Definitions
//!
//! The `MigrationPlan` custom resource plus typed views of the OpenShift
//! resources it converts.

pub mod migration_plan;
pub mod openshift;

pub use migration_plan::*;
pub use openshift::*;
