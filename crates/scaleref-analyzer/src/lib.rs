//! scaleref-analyzer — HorizontalPodAutoscaler reference validation.
//!
//! Checks that every autoscaler's scale-target reference names a supported
//! workload kind and that the workload exists, then reports each failing
//! autoscaler with its parent object for context.
//!
//! # Pipeline
//!
//! ```text
//! list_autoscalers(namespace)
//!   └── per autoscaler (sequential)
//!       ├── policy::policy_for(kind)     unsupported → failure, no lookup
//!       ├── resolver::resolve()          one get-by-name in the HPA's namespace
//!       └── classifier::check()          0 or 1 failure strings
//!   └── PreAnalysis (BTreeMap keyed by namespace/name, failing only)
//!       └── aggregator::aggregate()      + OwnershipResolver → DiagnosticResult
//! ```
//!
//! Only a failed listing aborts a pass. Everything else surfaces as a
//! failure string on the affected autoscaler.

pub mod aggregator;
pub mod classifier;
pub mod memory;
pub mod ownership;
pub mod policy;
pub mod ports;
pub mod report;
pub mod resolver;

use std::sync::Arc;

use scaleref_core::{AnalysisError, DiagnosticResult, PreAnalysisEntry};
use tracing::{debug, info};

pub use aggregator::PreAnalysis;
pub use memory::MemoryCluster;
pub use ownership::OwnerChain;
pub use ports::{ClusterAccessor, NoOwnership, OwnerLookup, OwnershipResolver};

/// Runs analysis passes against a cluster.
pub struct Analyzer {
    accessor: Arc<dyn ClusterAccessor>,
    ownership: Arc<dyn OwnershipResolver>,
    namespace: Option<String>,
}

impl Analyzer {
    /// Create an analyzer scoped to all namespaces.
    pub fn new(accessor: Arc<dyn ClusterAccessor>, ownership: Arc<dyn OwnershipResolver>) -> Self {
        Self {
            accessor,
            ownership,
            namespace: None,
        }
    }

    /// Restrict analysis to a single namespace.
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    /// Resolve and classify every autoscaler, keeping only failing ones.
    pub async fn pre_analysis(&self) -> Result<PreAnalysis, AnalysisError> {
        let autoscalers = self
            .accessor
            .list_autoscalers(self.namespace.as_deref())
            .await
            .map_err(AnalysisError::Enumeration)?;

        debug!(
            count = autoscalers.len(),
            namespace = self.namespace.as_deref().unwrap_or("*"),
            "autoscalers listed"
        );

        let mut pre_analysis = PreAnalysis::new();
        for hpa in autoscalers {
            let failures = classifier::check(self.accessor.as_ref(), &hpa).await;
            if failures.is_empty() {
                continue;
            }
            pre_analysis.insert(
                hpa.key(),
                PreAnalysisEntry {
                    object: hpa,
                    failures,
                },
            );
        }

        Ok(pre_analysis)
    }

    /// Run a full pass and return one result per failing autoscaler.
    pub async fn analyze(&self) -> Result<Vec<DiagnosticResult>, AnalysisError> {
        let pre_analysis = self.pre_analysis().await?;
        let results = aggregator::aggregate(pre_analysis, self.ownership.as_ref()).await;

        info!(failing = results.len(), "analysis complete");
        Ok(results)
    }
}
