//! Playback engine trait
//!
//! The transport seam between the player state machine's effects and a
//! concrete media backend. Implementations own the decode/render side;
//! they report back asynchronously by emitting [`EngineStatus`] ticks,
//! tagged with the session generation passed to [`PlaybackEngine::load`],
//! on whatever channel the application wired up at construction.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One status tick from the engine.
///
/// Emitted at an engine-driven frequency. Position, duration, and playing
/// state are only meaningful when `is_loaded` is true; consumers ignore
/// ticks for unloaded media. `did_just_finish` is set on exactly one tick
/// per natural end of media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Whether media is currently loaded
    pub is_loaded: bool,

    /// Current playback position in milliseconds
    pub position_ms: u64,

    /// Media duration in milliseconds
    pub duration_ms: u64,

    /// Whether playback is running (not paused)
    pub is_playing: bool,

    /// True on the single tick that reports a natural end of media
    pub did_just_finish: bool,
}

/// Transport operations on a single active media session.
///
/// All operations apply to the most recently loaded media. `load` replaces
/// any current session and starts the new one playing at the given rate and
/// volume, so those settings survive video switches without extra calls.
#[async_trait]
pub trait PlaybackEngine: Send {
    /// Load `uri` as session `generation` and start playing it.
    ///
    /// Status ticks for the new media carry `generation`; ticks still in
    /// flight from a replaced session keep the generation they were loaded
    /// with.
    async fn load(&mut self, generation: u64, uri: &str, rate: f32, volume: f32) -> Result<()>;

    /// Resume a paused session
    async fn resume(&mut self) -> Result<()>;

    /// Pause the session
    async fn pause(&mut self) -> Result<()>;

    /// Seek to an absolute position in milliseconds
    async fn seek_to(&mut self, position_ms: u64) -> Result<()>;

    /// Set the playback rate
    async fn set_rate(&mut self, rate: f32) -> Result<()>;

    /// Set the volume (`0.0` to `1.0`)
    async fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Stop and unload the current session, if any
    async fn unload(&mut self) -> Result<()>;
}
