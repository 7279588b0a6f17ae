//! Effects requested by the player state machine
//!
//! The controller performs no IO. Every intent or event handler appends
//! zero or more effects to an internal queue; the application shell drains
//! the queue after each call and executes the effects in order against the
//! engine, the video source, and the notification dispatcher.

use serde::{Deserialize, Serialize};

/// One IO action for the shell to execute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Enumerate the library, answering with the given token
    Scan {
        /// Token the completion event must echo
        token: u64,
        /// Upper bound on the number of assets to return
        max_count: usize,
    },

    /// Load a new session and start it playing.
    ///
    /// Carries the persisted rate and volume so the engine applies them to
    /// the fresh session in one step.
    Load {
        /// Generation tag for the new session's status ticks
        generation: u64,
        /// Resource to play
        uri: String,
        /// Playback rate to apply at load
        rate: f32,
        /// Volume to apply at load
        volume: f32,
    },

    /// Resume the paused session
    Resume,

    /// Pause the session
    Pause,

    /// Seek to an absolute position
    SeekTo {
        /// Target position in milliseconds, already clamped to the duration
        position_ms: u64,
    },

    /// Apply a playback rate to the session
    SetRate {
        /// The new rate
        rate: f32,
    },

    /// Apply a volume to the session
    SetVolume {
        /// The new volume
        volume: f32,
    },

    /// Stop and unload the superseded session (best-effort)
    Unload,

    /// Dispatch a system notification, fire-and-forget
    Notify {
        /// Notification title
        title: String,
        /// Notification body
        body: String,
    },

    /// Surface a user-facing failure message
    Alert {
        /// Message to display
        message: String,
    },
}

impl Effect {
    /// Whether this effect drives the playback engine.
    ///
    /// Scan, notify, and alert effects go to other collaborators.
    pub fn is_engine_call(&self) -> bool {
        matches!(
            self,
            Effect::Load { .. }
                | Effect::Resume
                | Effect::Pause
                | Effect::SeekTo { .. }
                | Effect::SetRate { .. }
                | Effect::SetVolume { .. }
                | Effect::Unload
        )
    }
}
