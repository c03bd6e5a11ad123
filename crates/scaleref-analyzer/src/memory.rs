//! In-memory cluster backed by a [`ClusterSnapshot`].
//!
//! Serves offline analysis of a captured snapshot and doubles as a spy in
//! tests: every existence lookup is recorded so callers can assert which
//! kinds were (or were not) queried.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use scaleref_core::{
    AccessError, AccessResult, AutoscalerObject, ClusterSnapshot, ObjectMeta, OwnerReference,
};
use tracing::debug;

use crate::ports::{ClusterAccessor, OwnerLookup};

/// Workloads keyed by `{kind}:{namespace}/{name}`.
fn workload_key(kind: &str, namespace: &str, name: &str) -> String {
    format!("{kind}:{namespace}/{name}")
}

#[derive(Debug)]
pub struct MemoryCluster {
    autoscalers: Vec<AutoscalerObject>,
    workloads: HashMap<String, ObjectMeta>,
    lookups: Mutex<Vec<String>>,
    fail_enumeration: bool,
    fail_lookups: bool,
}

impl MemoryCluster {
    pub fn new(snapshot: ClusterSnapshot) -> Self {
        let workloads = snapshot
            .workloads
            .into_iter()
            .map(|w| {
                let key = workload_key(&w.kind, &w.metadata.namespace, &w.metadata.name);
                (key, w.metadata)
            })
            .collect();
        Self {
            autoscalers: snapshot.autoscalers,
            workloads,
            lookups: Mutex::new(Vec::new()),
            fail_enumeration: false,
            fail_lookups: false,
        }
    }

    /// Load a JSON snapshot from disk.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot at {}", path.display()))?;
        let snapshot = ClusterSnapshot::from_json(&content)
            .with_context(|| format!("failed to parse snapshot at {}", path.display()))?;
        debug!(
            path = %path.display(),
            autoscalers = snapshot.autoscalers.len(),
            workloads = snapshot.workloads.len(),
            "snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }

    /// Make `list_autoscalers` fail.
    pub fn fail_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    /// Make every existence and owner lookup fail.
    pub fn fail_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// Total number of existence lookups served.
    pub fn lookup_count(&self) -> usize {
        self.recorded().len()
    }

    /// Number of existence lookups served for `kind`.
    pub fn lookups_for(&self, kind: &str) -> usize {
        self.recorded().iter().filter(|k| k.as_str() == kind).count()
    }

    fn recorded(&self) -> Vec<String> {
        self.lookups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn exists(&self, kind: &str, namespace: &str, name: &str) -> AccessResult<bool> {
        self.lookups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(kind.to_string());

        if self.fail_lookups {
            return Err(AccessError::Snapshot(format!(
                "lookup of {kind} {namespace}/{name} refused"
            )));
        }
        Ok(self
            .workloads
            .contains_key(&workload_key(kind, namespace, name)))
    }
}

#[async_trait]
impl ClusterAccessor for MemoryCluster {
    async fn list_autoscalers(&self, namespace: Option<&str>) -> AccessResult<Vec<AutoscalerObject>> {
        if self.fail_enumeration {
            return Err(AccessError::Snapshot(
                "autoscaler listing refused".to_string(),
            ));
        }
        Ok(self
            .autoscalers
            .iter()
            .filter(|hpa| namespace.is_none_or(|ns| hpa.namespace() == ns))
            .cloned()
            .collect())
    }

    async fn deployment_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists("Deployment", namespace, name)
    }

    async fn replication_controller_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists("ReplicationController", namespace, name)
    }

    async fn replica_set_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists("ReplicaSet", namespace, name)
    }

    async fn stateful_set_exists(&self, namespace: &str, name: &str) -> AccessResult<bool> {
        self.exists("StatefulSet", namespace, name)
    }
}

#[async_trait]
impl OwnerLookup for MemoryCluster {
    async fn owner_references(
        &self,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> AccessResult<Option<Vec<OwnerReference>>> {
        if self.fail_lookups {
            return Err(AccessError::Snapshot(format!(
                "owner lookup of {kind} {namespace}/{name} refused"
            )));
        }
        Ok(self
            .workloads
            .get(&workload_key(kind, namespace, name))
            .map(|meta| meta.owner_references.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaleref_core::{ScaleTargetRef, WorkloadObject};

    fn snapshot() -> ClusterSnapshot {
        ClusterSnapshot {
            autoscalers: vec![
                AutoscalerObject::new("ns1", "web", ScaleTargetRef::new("Deployment", "web")),
                AutoscalerObject::new("ns2", "web", ScaleTargetRef::new("Deployment", "web")),
            ],
            workloads: vec![
                WorkloadObject::new("Deployment", "ns1", "web"),
                WorkloadObject::new("ReplicaSet", "ns1", "web-abc").owned_by("Deployment", "web"),
            ],
        }
    }

    #[tokio::test]
    async fn list_filters_by_namespace() {
        let cluster = MemoryCluster::new(snapshot());
        assert_eq!(cluster.list_autoscalers(None).await.unwrap().len(), 2);

        let scoped = cluster.list_autoscalers(Some("ns2")).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].key(), "ns2/web");
    }

    #[tokio::test]
    async fn lookups_are_recorded_per_kind() {
        let cluster = MemoryCluster::new(snapshot());
        assert!(cluster.deployment_exists("ns1", "web").await.unwrap());
        assert!(!cluster.stateful_set_exists("ns1", "web").await.unwrap());
        assert_eq!(cluster.lookup_count(), 2);
        assert_eq!(cluster.lookups_for("Deployment"), 1);
        assert_eq!(cluster.lookups_for("StatefulSet"), 1);
    }

    #[tokio::test]
    async fn owner_references_of_missing_object() {
        let cluster = MemoryCluster::new(snapshot());
        let owners = cluster
            .owner_references("ReplicaSet", "ns1", "web-abc")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owners[0].kind, "Deployment");
        assert!(cluster
            .owner_references("ReplicaSet", "ns1", "gone")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn failing_enumeration() {
        let cluster = MemoryCluster::new(snapshot()).fail_enumeration();
        assert!(cluster.list_autoscalers(None).await.is_err());
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, serde_json::to_string(&snapshot()).unwrap()).unwrap();

        let cluster = MemoryCluster::from_file(&path).unwrap();
        assert_eq!(cluster.autoscalers.len(), 2);
        assert_eq!(cluster.workloads.len(), 2);
    }

    #[test]
    fn from_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "not json").unwrap();

        let err = MemoryCluster::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse snapshot"));
    }

    #[test]
    fn debug_output_lists_autoscalers() {
        let cluster = MemoryCluster::new(snapshot());
        let text = format!("{cluster:?}");
        assert!(text.contains("MemoryCluster"));
        assert!(text.contains("ns2"));
    }
}
