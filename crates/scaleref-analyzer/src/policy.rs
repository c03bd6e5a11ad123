//! Kind policy table — which scale-target kinds can be resolved, and how.
//!
//! Each supported kind is bound to the typed accessor lookup for that kind.
//! Kinds missing from the table are rejected before any cluster call is made.
//! Adding a workload kind means adding a row here and a lookup on
//! [`ClusterAccessor`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use scaleref_core::AccessResult;

use crate::ports::ClusterAccessor;

/// Future returned by a bound existence lookup.
pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = AccessResult<bool>> + Send + 'a>>;

/// Existence check bound to one workload kind: `(accessor, namespace, name)`.
pub type LookupFn = for<'a> fn(&'a dyn ClusterAccessor, &'a str, &'a str) -> LookupFuture<'a>;

/// Workload kinds an autoscaler may legitimately target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    ReplicationController,
    ReplicaSet,
    StatefulSet,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::ReplicationController => "ReplicationController",
            WorkloadKind::ReplicaSet => "ReplicaSet",
            WorkloadKind::StatefulSet => "StatefulSet",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the policy table.
pub struct KindPolicy {
    pub kind: WorkloadKind,
    lookup: LookupFn,
}

impl KindPolicy {
    /// Run the bound existence check.
    pub fn exists<'a>(
        &self,
        accessor: &'a dyn ClusterAccessor,
        namespace: &'a str,
        name: &'a str,
    ) -> LookupFuture<'a> {
        (self.lookup)(accessor, namespace, name)
    }
}

impl fmt::Debug for KindPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindPolicy").field("kind", &self.kind).finish()
    }
}

fn deployment<'a>(c: &'a dyn ClusterAccessor, ns: &'a str, name: &'a str) -> LookupFuture<'a> {
    c.deployment_exists(ns, name)
}

fn replication_controller<'a>(
    c: &'a dyn ClusterAccessor,
    ns: &'a str,
    name: &'a str,
) -> LookupFuture<'a> {
    c.replication_controller_exists(ns, name)
}

fn replica_set<'a>(c: &'a dyn ClusterAccessor, ns: &'a str, name: &'a str) -> LookupFuture<'a> {
    c.replica_set_exists(ns, name)
}

fn stateful_set<'a>(c: &'a dyn ClusterAccessor, ns: &'a str, name: &'a str) -> LookupFuture<'a> {
    c.stateful_set_exists(ns, name)
}

static POLICIES: &[KindPolicy] = &[
    KindPolicy {
        kind: WorkloadKind::Deployment,
        lookup: deployment,
    },
    KindPolicy {
        kind: WorkloadKind::ReplicationController,
        lookup: replication_controller,
    },
    KindPolicy {
        kind: WorkloadKind::ReplicaSet,
        lookup: replica_set,
    },
    KindPolicy {
        kind: WorkloadKind::StatefulSet,
        lookup: stateful_set,
    },
];

/// Look up the policy for a reference kind. Matching is case-sensitive.
pub fn policy_for(kind: &str) -> Option<&'static KindPolicy> {
    POLICIES.iter().find(|p| p.kind.as_str() == kind)
}

/// All kinds the table knows how to resolve.
pub fn supported_kinds() -> impl Iterator<Item = WorkloadKind> {
    POLICIES.iter().map(|p| p.kind)
}
