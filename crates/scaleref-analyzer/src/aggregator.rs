//! Result aggregator — turns pre-analysis entries into diagnostic results.

use std::collections::BTreeMap;

use scaleref_core::{AUTOSCALER_KIND, DiagnosticResult, PreAnalysisEntry};
use tracing::debug;

use crate::ports::OwnershipResolver;

/// Failing autoscalers keyed by `{namespace}/{name}`.
///
/// Ordered by key, so results come out sorted by identity on every run.
pub type PreAnalysis = BTreeMap<String, PreAnalysisEntry>;

/// Build one diagnostic result per entry, attaching parent context.
///
/// A missing parent never suppresses a result.
pub async fn aggregate(
    pre_analysis: PreAnalysis,
    ownership: &dyn OwnershipResolver,
) -> Vec<DiagnosticResult> {
    let mut results = Vec::with_capacity(pre_analysis.len());

    for (key, entry) in pre_analysis {
        let parent_object = ownership.resolve_parent(&entry.object.metadata).await;
        if parent_object.is_none() {
            debug!(autoscaler = %key, "no parent object");
        }

        results.push(DiagnosticResult {
            kind: AUTOSCALER_KIND.to_string(),
            name: key,
            failures: entry.failures,
            parent_object,
        });
    }

    results
}
