//! Parent resolution by walking owner references.
//!
//! Starting from an object's owner references, the walk prefers the
//! controlling owner (falling back to the first listed), fetches that
//! owner's own references, and keeps climbing. The top-most owner reached
//! is reported as the parent.
//!
//! ```text
//! HPA ──► ReplicaSet/web-7d9 ──► Deployment/web ──► (no owners)   => Deployment/web
//! ```
//!
//! The walk never fails: a lookup error, a missing owner, a cycle, or the
//! depth limit all stop the climb at the last owner reached.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use scaleref_core::{ObjectMeta, OwnerReference, ParentRef};
use tracing::debug;

use crate::ports::{OwnerLookup, OwnershipResolver};

pub struct OwnerChain {
    lookup: Arc<dyn OwnerLookup>,
    max_depth: usize,
}

impl OwnerChain {
    /// `max_depth` is the number of owner hops to follow; 0 disables
    /// parent resolution.
    pub fn new(lookup: Arc<dyn OwnerLookup>, max_depth: usize) -> Self {
        Self { lookup, max_depth }
    }
}

fn pick_owner(owners: &[OwnerReference]) -> Option<&OwnerReference> {
    owners.iter().find(|o| o.controller).or_else(|| owners.first())
}

#[async_trait]
impl OwnershipResolver for OwnerChain {
    async fn resolve_parent(&self, meta: &ObjectMeta) -> Option<ParentRef> {
        if self.max_depth == 0 {
            return None;
        }

        let namespace = meta.namespace.as_str();
        let mut current = pick_owner(&meta.owner_references)?.clone();
        let mut seen = HashSet::new();
        seen.insert((current.kind.clone(), current.name.clone()));

        for _ in 1..self.max_depth {
            let owners = self
                .lookup
                .owner_references(&current.kind, namespace, &current.name)
                .await;

            match owners {
                Ok(Some(owners)) => match pick_owner(&owners) {
                    Some(next) if seen.insert((next.kind.clone(), next.name.clone())) => {
                        current = next.clone();
                    }
                    Some(next) => {
                        debug!(
                            %namespace,
                            kind = %next.kind,
                            name = %next.name,
                            "owner cycle detected"
                        );
                        break;
                    }
                    None => break,
                },
                Ok(None) => {
                    debug!(%namespace, kind = %current.kind, name = %current.name, "owner not found");
                    break;
                }
                Err(e) => {
                    debug!(
                        %namespace,
                        kind = %current.kind,
                        name = %current.name,
                        error = %e,
                        "owner lookup failed"
                    );
                    break;
                }
            }
        }

        Some(ParentRef {
            kind: current.kind,
            name: current.name,
            namespace: namespace.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCluster;
    use scaleref_core::{ClusterSnapshot, WorkloadObject};

    fn chain(workloads: Vec<WorkloadObject>, max_depth: usize) -> OwnerChain {
        let cluster = MemoryCluster::new(ClusterSnapshot {
            autoscalers: vec![],
            workloads,
        });
        OwnerChain::new(Arc::new(cluster), max_depth)
    }

    fn owner(kind: &str, name: &str, controller: bool) -> OwnerReference {
        OwnerReference {
            kind: kind.to_string(),
            name: name.to_string(),
            controller,
        }
    }

    #[tokio::test]
    async fn no_owner_references_means_no_parent() {
        let chain = chain(vec![], 8);
        assert_eq!(chain.resolve_parent(&ObjectMeta::new("ns1", "web")).await, None);
    }

    #[tokio::test]
    async fn climbs_to_top_most_owner() {
        let chain = chain(
            vec![
                WorkloadObject::new("ReplicaSet", "ns1", "web-7d9").owned_by("Deployment", "web"),
                WorkloadObject::new("Deployment", "ns1", "web"),
            ],
            8,
        );
        let meta = ObjectMeta::new("ns1", "web").with_owner(owner("ReplicaSet", "web-7d9", true));

        let parent = chain.resolve_parent(&meta).await.unwrap();
        assert_eq!(parent.kind, "Deployment");
        assert_eq!(parent.name, "web");
        assert_eq!(parent.namespace, "ns1");
    }

    #[tokio::test]
    async fn prefers_controller_owner() {
        let chain = chain(vec![], 8);
        let meta = ObjectMeta::new("ns1", "web")
            .with_owner(owner("ConfigMap", "settings", false))
            .with_owner(owner("StatefulSet", "db", true));

        let parent = chain.resolve_parent(&meta).await.unwrap();
        assert_eq!(parent.to_string(), "StatefulSet/db");
    }

    #[tokio::test]
    async fn missing_owner_stops_at_last_reference() {
        let chain = chain(vec![], 8);
        let meta = ObjectMeta::new("ns1", "web").with_owner(owner("ReplicaSet", "gone", true));

        let parent = chain.resolve_parent(&meta).await.unwrap();
        assert_eq!(parent.to_string(), "ReplicaSet/gone");
    }

    #[tokio::test]
    async fn lookup_errors_do_not_drop_parent() {
        let cluster = MemoryCluster::new(ClusterSnapshot::default()).fail_lookups();
        let chain = OwnerChain::new(Arc::new(cluster), 8);
        let meta = ObjectMeta::new("ns1", "web").with_owner(owner("ReplicaSet", "web-7d9", true));

        let parent = chain.resolve_parent(&meta).await.unwrap();
        assert_eq!(parent.to_string(), "ReplicaSet/web-7d9");
    }

    #[tokio::test]
    async fn respects_depth_limit() {
        let chain = chain(
            vec![
                WorkloadObject::new("ReplicaSet", "ns1", "a").owned_by("Deployment", "b"),
                WorkloadObject::new("Deployment", "ns1", "b").owned_by("Rollout", "c"),
                WorkloadObject::new("Rollout", "ns1", "c"),
            ],
            2,
        );
        let meta = ObjectMeta::new("ns1", "web").with_owner(owner("ReplicaSet", "a", true));

        let parent = chain.resolve_parent(&meta).await.unwrap();
        assert_eq!(parent.to_string(), "Deployment/b");
    }

    #[tokio::test]
    async fn zero_depth_disables_resolution() {
        let chain = chain(vec![], 0);
        let meta = ObjectMeta::new("ns1", "web").with_owner(owner("ReplicaSet", "a", true));
        assert_eq!(chain.resolve_parent(&meta).await, None);
    }

    #[tokio::test]
    async fn cycles_terminate() {
        let chain = chain(
            vec![
                WorkloadObject::new("ReplicaSet", "ns1", "a").owned_by("Deployment", "b"),
                WorkloadObject::new("Deployment", "ns1", "b").owned_by("ReplicaSet", "a"),
            ],
            32,
        );
        let meta = ObjectMeta::new("ns1", "web").with_owner(owner("ReplicaSet", "a", true));

        let parent = chain.resolve_parent(&meta).await.unwrap();
        assert_eq!(parent.to_string(), "Deployment/b");
    }
}
