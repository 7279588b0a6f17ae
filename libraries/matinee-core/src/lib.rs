//! Matinee Core
//!
//! Shared domain types for Matinee.
//!
//! This crate defines:
//! - **Domain Types**: `VideoAsset`, `VideoId`
//! - **Scan Errors**: `ScanError`, shared between the library scanner and
//!   the player state machine so neither depends on the other
//! - **Display Helpers**: `format_time`
//!
//! # Example
//!
//! ```rust
//! use matinee_core::types::{VideoAsset, VideoId};
//!
//! let video = VideoAsset::new(
//!     VideoId::new("/videos/clip.mp4"),
//!     None,
//!     "/videos/clip.mp4",
//! );
//! assert_eq!(video.filename, "clip.mp4");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod types;

// Re-export commonly used types
pub use error::ScanError;
pub use time::format_time;
pub use types::{VideoAsset, VideoId};
