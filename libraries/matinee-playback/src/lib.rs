//! Matinee - Player State Machine
//!
//! Headless playback management for Matinee.
//!
//! This crate provides:
//! - The player screen controller (list, selection, transport state)
//! - Circular next/previous navigation over the enumerated list
//! - A fixed playback-rate cycle and a binary volume toggle
//! - Session generations and scan request tokens that discard stale
//!   engine ticks and superseded enumeration results
//! - The welcome splash sequence (fade-in, hold, fade-out, dismissed)
//!
//! # Architecture
//!
//! `matinee-playback` is completely backend-agnostic:
//! - No dependency on mpv or any media process
//! - No dependency on a terminal or rendering layer
//! - No filesystem access
//!
//! The controller mutates its [`PlayerState`] synchronously and queues
//! [`Effect`]s; the application shell drains the queue and performs the
//! IO, feeding completions back as [`PlayerEvent`]s. Media backends
//! implement the [`PlaybackEngine`] trait.
//!
//! # Example
//!
//! ```rust
//! use matinee_core::types::{VideoAsset, VideoId};
//! use matinee_playback::{Effect, PlayerController};
//!
//! let mut controller = PlayerController::new();
//!
//! // A user intent mutates state and queues effects for the shell.
//! let video = VideoAsset::new(VideoId::new("v1"), None, "/videos/v1.mp4");
//! controller.play(video);
//!
//! assert!(controller.state().is_playing);
//! let effects = controller.take_effects();
//! assert!(matches!(effects[0], Effect::Load { .. }));
//! ```

mod controller;
mod curve;
mod effects;
mod engine;
mod error;
mod events;
mod rate;
mod splash;
mod state;

// Public exports
pub use controller::{PlayerController, MAX_SCAN_RESULTS};
pub use curve::{EaseCurve, Spring};
pub use effects::Effect;
pub use engine::{EngineStatus, PlaybackEngine};
pub use error::{EngineError, Result};
pub use events::PlayerEvent;
pub use rate::{next_rate, DEFAULT_RATE, PLAYBACK_RATES};
pub use splash::{
    SplashController, SplashFrame, SplashPhase, DISPLAY_MS, FADE_IN_MS, FADE_OUT_MS,
};
pub use state::{PlayerState, DEFAULT_VOLUME};
