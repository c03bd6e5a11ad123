//! Shared types used across scaleref crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind reported on every diagnostic produced by the analyzer.
pub const AUTOSCALER_KIND: &str = "HorizontalPodAutoscaler";

// ── Object metadata ───────────────────────────────────────────────

/// Link from an object to the object that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
    /// Whether this owner is the managing controller.
    #[serde(default)]
    pub controller: bool,
}

/// The subset of Kubernetes object metadata the analyzer needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub owner_references: Vec<OwnerReference>,
}

impl ObjectMeta {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            owner_references: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: OwnerReference) -> Self {
        self.owner_references.push(owner);
        self
    }

    /// `{namespace}/{name}`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

// ── Autoscaler ────────────────────────────────────────────────────

/// The workload an autoscaler is configured to scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleTargetRef {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl ScaleTargetRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            api_version: None,
        }
    }
}

/// A HorizontalPodAutoscaler as seen by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoscalerObject {
    pub metadata: ObjectMeta,
    pub scale_target_ref: ScaleTargetRef,
}

impl AutoscalerObject {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        scale_target_ref: ScaleTargetRef,
    ) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            scale_target_ref,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Identity used to key pre-analysis entries: `{namespace}/{name}`.
    pub fn key(&self) -> String {
        self.metadata.key()
    }
}

// ── Failures ──────────────────────────────────────────────────────

/// A single problem found with an autoscaler's scale-target reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The reference kind is not one the analyzer knows how to resolve.
    UnsupportedKind { kind: String },
    /// The kind is supported but no such object could be found.
    TargetNotFound { kind: String, name: String },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::UnsupportedKind { kind } => write!(
                f,
                "{AUTOSCALER_KIND} uses {kind} as ScaleTargetRef which is not a supported option."
            ),
            Failure::TargetNotFound { kind, name } => write!(
                f,
                "{AUTOSCALER_KIND} uses {kind}/{name} as ScaleTargetRef which does not exist."
            ),
        }
    }
}

/// Ordered failure descriptions for one autoscaler, in the order checks ran.
pub type FailureRecord = Vec<String>;

/// An autoscaler with at least one failure, waiting for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreAnalysisEntry {
    pub object: AutoscalerObject,
    pub failures: FailureRecord,
}

// ── Results ───────────────────────────────────────────────────────

/// Top-most owner of an object, attached to results for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Final diagnostic record for one failing autoscaler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub kind: String,
    /// `{namespace}/{name}` of the autoscaler.
    pub name: String,
    pub failures: FailureRecord,
    pub parent_object: Option<ParentRef>,
}

// ── Snapshots ─────────────────────────────────────────────────────

/// Any non-autoscaler object captured in a snapshot: workloads and their owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadObject {
    pub kind: String,
    pub metadata: ObjectMeta,
}

impl WorkloadObject {
    pub fn new(kind: impl Into<String>, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            metadata: ObjectMeta::new(namespace, name),
        }
    }

    pub fn owned_by(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.metadata.owner_references.push(OwnerReference {
            kind: kind.into(),
            name: name.into(),
            controller: true,
        });
        self
    }
}

/// Point-in-time view of the objects relevant to an analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub autoscalers: Vec<AutoscalerObject>,
    #[serde(default)]
    pub workloads: Vec<WorkloadObject>,
}

impl ClusterSnapshot {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
