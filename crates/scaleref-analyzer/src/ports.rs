//! Collaborator interfaces the analyzer is wired against.

use async_trait::async_trait;
use scaleref_core::{AccessResult, AutoscalerObject, ObjectMeta, OwnerReference, ParentRef};

/// Typed read access to the cluster objects the analyzer inspects.
///
/// The `*_exists` lookups return `Ok(false)` when the object is absent and
/// `Err` when existence could not be confirmed.
#[async_trait]
pub trait ClusterAccessor: Send + Sync {
    /// List autoscalers in `namespace`, or in every namespace when `None`.
    async fn list_autoscalers(&self, namespace: Option<&str>) -> AccessResult<Vec<AutoscalerObject>>;

    async fn deployment_exists(&self, namespace: &str, name: &str) -> AccessResult<bool>;

    async fn replication_controller_exists(&self, namespace: &str, name: &str) -> AccessResult<bool>;

    async fn replica_set_exists(&self, namespace: &str, name: &str) -> AccessResult<bool>;

    async fn stateful_set_exists(&self, namespace: &str, name: &str) -> AccessResult<bool>;
}

/// Resolves the owning parent of an object for diagnostic context.
#[async_trait]
pub trait OwnershipResolver: Send + Sync {
    /// Returns `None` when the object has no owner or none could be found.
    async fn resolve_parent(&self, meta: &ObjectMeta) -> Option<ParentRef>;
}

/// Fetches the owner references of an arbitrary object.
#[async_trait]
pub trait OwnerLookup: Send + Sync {
    /// `Ok(None)` means the object itself does not exist.
    async fn owner_references(
        &self,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> AccessResult<Option<Vec<OwnerReference>>>;
}

/// Ownership resolver that never finds a parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOwnership;

#[async_trait]
impl OwnershipResolver for NoOwnership {
    async fn resolve_parent(&self, _meta: &ObjectMeta) -> Option<ParentRef> {
        None
    }
}
