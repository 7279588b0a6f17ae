//! Matinee mpv Engine
//!
//! Implements the playback engine seam on top of an mpv subprocess
//! driven over its JSON IPC socket.
//!
//! # Architecture
//!
//! - `ipc`: wire encoding and parsing for mpv's newline-delimited JSON
//! - `status`: folds property streams into generation-tagged status ticks
//! - `engine`: process lifecycle, transport commands, health monitoring
//!
//! The IPC transport is a unix socket, so the engine itself is only
//! available on unix targets; the protocol and status modules are
//! portable.

pub mod ipc;
pub mod status;

#[cfg(unix)]
mod engine;

#[cfg(unix)]
pub use engine::MpvEngine;
pub use status::StatusTracker;
