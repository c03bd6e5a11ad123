//! Error types for cluster access and analysis passes.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for cluster accessor operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors raised by a cluster accessor or owner lookup.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("api error: {0}")]
    Api(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Errors that abort a whole analysis pass.
///
/// Per-object problems are never errors; they are reported as failures on
/// the object's diagnostic result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to list horizontal pod autoscalers: {0}")]
    Enumeration(#[source] AccessError),
}
