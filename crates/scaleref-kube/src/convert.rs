//! Conversions from k8s-openapi types into scaleref types.

use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as meta;
use scaleref_core::{AutoscalerObject, ObjectMeta, OwnerReference, ScaleTargetRef};

pub fn owner_references(refs: Option<Vec<meta::OwnerReference>>) -> Vec<OwnerReference> {
    refs.unwrap_or_default()
        .into_iter()
        .map(|r| OwnerReference {
            kind: r.kind,
            name: r.name,
            controller: r.controller.unwrap_or(false),
        })
        .collect()
}

pub fn object_meta(meta: meta::ObjectMeta) -> ObjectMeta {
    ObjectMeta {
        namespace: meta.namespace.unwrap_or_default(),
        name: meta.name.unwrap_or_default(),
        owner_references: owner_references(meta.owner_references),
    }
}

/// A missing spec yields an empty reference, which the policy table rejects.
pub fn autoscaler(hpa: HorizontalPodAutoscaler) -> AutoscalerObject {
    let target = hpa.spec.unwrap_or_default().scale_target_ref;
    AutoscalerObject {
        metadata: object_meta(hpa.metadata),
        scale_target_ref: ScaleTargetRef {
            kind: target.kind,
            name: target.name,
            api_version: target.api_version,
        },
    }
}
