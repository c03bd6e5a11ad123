//! Reference resolver — decides whether a scale target exists.

use scaleref_core::ScaleTargetRef;
use tracing::{debug, warn};

use crate::policy;
use crate::ports::ClusterAccessor;

/// Outcome of resolving one scale-target reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The target kind is supported and the object was found.
    Exists,
    /// The target kind is supported but the object could not be confirmed.
    NotFound,
    /// The target kind is not in the policy table; no lookup was made.
    Unsupported,
}

/// Resolve `target` within `namespace`.
///
/// Performs at most one lookup. Lookup errors (permission, transport,
/// timeout) are reported as `NotFound`; the cause is only logged.
pub async fn resolve(
    accessor: &dyn ClusterAccessor,
    namespace: &str,
    target: &ScaleTargetRef,
) -> Resolution {
    let Some(policy) = policy::policy_for(&target.kind) else {
        debug!(%namespace, kind = %target.kind, "unsupported scale target kind");
        return Resolution::Unsupported;
    };

    match policy.exists(accessor, namespace, &target.name).await {
        Ok(true) => Resolution::Exists,
        Ok(false) => {
            debug!(%namespace, kind = %policy.kind, name = %target.name, "scale target not found");
            Resolution::NotFound
        }
        Err(e) => {
            warn!(
                %namespace,
                kind = %policy.kind,
                name = %target.name,
                error = %e,
                "scale target lookup failed, treating as not found"
            );
            Resolution::NotFound
        }
    }
}
