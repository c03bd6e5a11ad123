//! scaleref-kube — live cluster access through kube-rs.
//!
//! [`KubeCluster`] implements both [`ClusterAccessor`] (autoscaler listing
//! and typed workload existence checks) and [`OwnerLookup`] (owner
//! references of workload kinds) on top of a shared `kube::Client`.
//!
//! Every API call is bounded by the configured lookup timeout. A 404 is an
//! absent object, not an error.
//!
//! [`ClusterAccessor`]: scaleref_analyzer::ClusterAccessor
//! [`OwnerLookup`]: scaleref_analyzer::OwnerLookup

pub mod cluster;
pub mod convert;

pub use cluster::KubeCluster;
