//! Events fed into the player state machine
//!
//! The application shell translates completions from the video source and
//! status ticks from the playback engine into these events and hands them
//! to the controller on its owning task.

use crate::engine::EngineStatus;
use matinee_core::error::ScanError;
use matinee_core::types::VideoAsset;
use serde::{Deserialize, Serialize};

/// An asynchronous completion or engine callback.
///
/// `ScanCompleted`/`ScanFailed` carry the request token captured when the
/// scan was issued; `Status` carries the generation of the session that
/// produced the tick. The controller ignores anything stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A library scan finished
    ScanCompleted {
        /// Token of the refresh request this result answers
        token: u64,
        /// Enumerated assets, in adapter order
        videos: Vec<VideoAsset>,
    },

    /// A library scan failed
    ScanFailed {
        /// Token of the refresh request this result answers
        token: u64,
        /// Why the scan failed
        error: ScanError,
    },

    /// A status tick from the playback engine
    Status {
        /// Generation of the session the tick belongs to
        generation: u64,
        /// The reported transport state
        status: EngineStatus,
    },

    /// The engine process or its control channel went away
    EngineLost {
        /// Human-readable cause
        message: String,
    },
}
