//! Matinee Video Library
//!
//! Enumerates the videos the player can show. The `VideoSource` trait is
//! the seam between the player shell and whatever provides its list; the
//! shipped implementation walks a directory tree on the local filesystem.
//!
//! # Architecture
//!
//! - `source`: the `VideoSource` trait
//! - `scanner`: `LocalVideoSource`, a `walkdir`-backed implementation

pub mod scanner;
pub mod source;

pub use scanner::{is_video_file, LocalVideoSource};
pub use source::VideoSource;
