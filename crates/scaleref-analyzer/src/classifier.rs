//! Failure classifier — turns resolutions into failure descriptions.

use scaleref_core::{AutoscalerObject, Failure, FailureRecord, ScaleTargetRef};

use crate::ports::ClusterAccessor;
use crate::resolver::{self, Resolution};

/// Map a resolution to the failure it represents, if any.
pub fn classify(target: &ScaleTargetRef, resolution: Resolution) -> Option<Failure> {
    match resolution {
        Resolution::Exists => None,
        Resolution::Unsupported => Some(Failure::UnsupportedKind {
            kind: target.kind.clone(),
        }),
        Resolution::NotFound => Some(Failure::TargetNotFound {
            kind: target.kind.clone(),
            name: target.name.clone(),
        }),
    }
}

/// Check one autoscaler and return its failures in the order they were found.
///
/// The kind check gates the existence check, so at most one failure is
/// recorded per autoscaler.
pub async fn check(accessor: &dyn ClusterAccessor, hpa: &AutoscalerObject) -> FailureRecord {
    let target = &hpa.scale_target_ref;
    let resolution = resolver::resolve(accessor, hpa.namespace(), target).await;

    let mut failures = FailureRecord::new();
    if let Some(failure) = classify(target, resolution) {
        failures.push(failure.to_string());
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exists_has_no_failure() {
        let target = ScaleTargetRef::new("Deployment", "api");
        assert_eq!(classify(&target, Resolution::Exists), None);
    }

    #[test]
    fn unsupported_names_only_the_kind() {
        let target = ScaleTargetRef::new("CronJob", "nightly");
        let failure = classify(&target, Resolution::Unsupported).unwrap();
        let text = failure.to_string();
        assert!(text.contains("CronJob"));
        assert!(text.contains("not a supported option"));
        assert!(!text.contains("nightly"));
    }

    #[test]
    fn not_found_names_kind_and_name() {
        let target = ScaleTargetRef::new("StatefulSet", "db");
        let failure = classify(&target, Resolution::NotFound).unwrap();
        assert!(failure.to_string().contains("StatefulSet/db"));
        assert!(failure.to_string().contains("does not exist"));
    }
}
