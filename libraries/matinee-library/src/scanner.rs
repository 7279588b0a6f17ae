//! Local filesystem scanning for video files

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use matinee_core::{ScanError, VideoAsset, VideoId};
use walkdir::WalkDir;

use crate::source::VideoSource;

/// Supported video file extensions
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "webm", "mov", "avi", "m4v", "wmv", "flv", "ts", "mpg", "mpeg",
];

/// Video source backed by a directory tree on the local filesystem
///
/// Walks the configured root, keeps files with a known video extension,
/// and yields them sorted by path so repeated scans agree on ordering.
pub struct LocalVideoSource {
    /// Root directory to enumerate
    root: PathBuf,

    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse
    max_depth: Option<usize>,
}

impl LocalVideoSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            max_depth: None,
        }
    }

    /// Set whether to follow symbolic links
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn collect(
        root: &Path,
        follow_links: bool,
        max_depth: Option<usize>,
        max_count: usize,
    ) -> Result<Vec<VideoAsset>, ScanError> {
        probe_access(root)?;

        let mut walker = WalkDir::new(root).follow_links(follow_links);
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let mut paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if is_video_file(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        paths.sort();
        paths.truncate(max_count);

        Ok(paths.iter().map(|path| asset_from_path(path)).collect())
    }
}

#[async_trait]
impl VideoSource for LocalVideoSource {
    async fn request_access(&self) -> Result<(), ScanError> {
        let root = self.root.clone();

        tokio::task::spawn_blocking(move || probe_access(&root))
            .await
            .map_err(|e| ScanError::failed(format!("scan task failed: {e}")))?
    }

    async fn scan(&self, max_count: usize) -> Result<Vec<VideoAsset>, ScanError> {
        let root = self.root.clone();
        let follow_links = self.follow_links;
        let max_depth = self.max_depth;

        tokio::task::spawn_blocking(move || {
            Self::collect(&root, follow_links, max_depth, max_count)
        })
        .await
        .map_err(|e| ScanError::failed(format!("scan task failed: {e}")))?
    }
}

/// Check whether the root directory can be read at all
fn probe_access(root: &Path) -> Result<(), ScanError> {
    match std::fs::read_dir(root) {
        Ok(_) => Ok(()),
        Err(e)
            if e.kind() == io::ErrorKind::PermissionDenied
                || e.kind() == io::ErrorKind::NotFound =>
        {
            Err(ScanError::PermissionDenied)
        }
        Err(e) => Err(ScanError::failed(e.to_string())),
    }
}

/// Check if a file has a supported video extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn asset_from_path(path: &Path) -> VideoAsset {
    let uri = path.display().to_string();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let mut asset = VideoAsset::new(VideoId::new(uri.clone()), filename, uri);

    if let Ok(meta) = path.metadata() {
        asset.size_bytes = Some(meta.len());
        asset.modified = meta.modified().ok().map(DateTime::<Utc>::from);
    }

    asset
}
