//! Scan error taxonomy shared across crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a library enumeration attempt failed.
///
/// Produced by video sources and consumed by the player state machine,
/// which surfaces both kinds as user-facing alerts while keeping the
/// previously enumerated list intact.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanError {
    /// Access to the media location was not granted
    #[error("Permission to access the video library was denied")]
    PermissionDenied,

    /// The adapter failed while enumerating
    #[error("Failed to enumerate videos: {0}")]
    Failed(String),
}

impl ScanError {
    /// Create an enumeration failure with context
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// True when the failure was a permission denial
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
