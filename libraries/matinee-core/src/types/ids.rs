//! ID types for Matinee entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Video identifier
///
/// Stable within a single enumeration result. The local filesystem source
/// uses the file path, so ids survive rescans of an unchanged tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Create a new video ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        let id = VideoId::new("/videos/a.mp4");
        assert_eq!(id.as_str(), "/videos/a.mp4");
        assert_eq!(id.to_string(), "/videos/a.mp4");
    }
}
