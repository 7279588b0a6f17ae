//! Video asset domain type

use crate::types::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One discoverable local video file.
///
/// Created by a video source on each enumeration. The player holds an
/// immutable ordered sequence of these for the session and replaces it
/// wholesale on refresh; individual assets are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAsset {
    /// Unique identifier within a single enumeration result
    pub id: VideoId,

    /// Display label
    pub filename: String,

    /// Playable resource locator, opaque to the player
    pub uri: String,

    /// File size in bytes, when the source knows it
    pub size_bytes: Option<u64>,

    /// Last modification time, when the source knows it
    pub modified: Option<DateTime<Utc>>,
}

impl VideoAsset {
    /// Create a new asset.
    ///
    /// When `filename` is absent the trailing path segment of `uri` is
    /// used as the display label.
    pub fn new(id: VideoId, filename: Option<String>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let filename = filename.unwrap_or_else(|| filename_from_uri(&uri));

        Self {
            id,
            filename,
            uri,
            size_bytes: None,
            modified: None,
        }
    }
}

/// Extract the trailing path segment of a URI for display.
///
/// Falls back to the whole URI when it has no separator or ends in one.
fn filename_from_uri(uri: &str) -> String {
    match uri.rsplit('/').next() {
        Some(tail) if !tail.is_empty() => tail.to_string(),
        _ => uri.to_string(),
    }
}
