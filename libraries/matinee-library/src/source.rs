//! Source trait for video enumeration

use async_trait::async_trait;
use matinee_core::{ScanError, VideoAsset};

/// Provider of the player's video list
///
/// The player shell talks to a `VideoSource` and never to the filesystem
/// directly, so tests and future remote sources can stand in for the local
/// scan.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Ask the source for permission to enumerate videos
    ///
    /// Denial is terminal for the attempt; the caller surfaces it and keeps
    /// its current list.
    async fn request_access(&self) -> Result<(), ScanError>;

    /// Enumerate up to `max_count` videos in the source's stable order
    async fn scan(&self, max_count: usize) -> Result<Vec<VideoAsset>, ScanError>;
}
