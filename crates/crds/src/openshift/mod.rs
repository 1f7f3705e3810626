//! OpenShift source resources
//!
//! Typed read models for the OpenShift-only kinds the migration controller
//! lists. These CRDs are owned by OpenShift, so no schema is generated for
//! them; only the fields the conversion reads are modelled; everything else
//! is ignored on deserialization.

pub mod deployment_config;
pub mod route;

pub use deployment_config::*;
pub use route::*;
