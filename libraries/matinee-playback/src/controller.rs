//! Player screen controller
//!
//! Owns the screen state and the full transition table. Intents (user
//! actions) and events (scan completions, engine status ticks) mutate the
//! state synchronously and append [`Effect`]s to a queue the shell drains
//! and executes; the controller itself never performs IO, which keeps the
//! whole table testable without an engine, a filesystem, or a terminal.
//!
//! Two monotonic counters defend against async races:
//!
//! - every playback session gets a **generation**; status ticks tagged
//!   with a superseded generation are discarded, so a slow unload can
//!   never let the old video overwrite state for the new one
//! - every refresh gets a **request token**; only the completion carrying
//!   the current token is applied, so rapid double-refresh cannot
//!   interleave half-applied results

use crate::effects::Effect;
use crate::events::PlayerEvent;
use crate::rate::next_rate;
use crate::state::PlayerState;
use matinee_core::types::VideoAsset;
use std::mem;
use tracing::{debug, trace, warn};

/// Upper bound on assets requested per enumeration
pub const MAX_SCAN_RESULTS: usize = 50;

/// The player screen state machine
#[derive(Debug)]
pub struct PlayerController {
    state: PlayerState,
    scan_token: u64,
    generation: u64,
    effects: Vec<Effect>,
}

impl PlayerController {
    /// Create a controller with empty state and no pending effects
    pub fn new() -> Self {
        Self {
            state: PlayerState::default(),
            scan_token: 0,
            generation: 0,
            effects: Vec::new(),
        }
    }

    /// Current screen state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Drain the pending effects, in emission order
    pub fn take_effects(&mut self) -> Vec<Effect> {
        mem::take(&mut self.effects)
    }

    // ===== User intents =====

    /// Re-enumerate the video library.
    ///
    /// Callable repeatedly; a newer refresh supersedes older in-flight ones
    /// through the request token. The result arrives later as a
    /// [`PlayerEvent::ScanCompleted`] or [`PlayerEvent::ScanFailed`].
    pub fn refresh(&mut self) {
        self.scan_token += 1;
        self.state.is_loading = true;
        debug!(token = self.scan_token, "refreshing video library");
        self.effects.push(Effect::Scan {
            token: self.scan_token,
            max_count: MAX_SCAN_RESULTS,
        });
    }

    /// Start playing `video`, replacing any current session.
    ///
    /// The superseded session is unloaded best-effort before the new load;
    /// its failure must not block the new session. Rate and volume are not
    /// reset and ride along on the load. Membership of `video` in the list
    /// is not enforced.
    pub fn play(&mut self, video: VideoAsset) {
        if self.state.has_session() {
            self.effects.push(Effect::Unload);
        }

        self.generation += 1;
        debug!(
            generation = self.generation,
            video = %video.id,
            "starting playback session"
        );

        self.effects.push(Effect::Load {
            generation: self.generation,
            uri: video.uri.clone(),
            rate: self.state.rate,
            volume: self.state.volume,
        });
        self.effects.push(Effect::Notify {
            title: "Now Playing".to_string(),
            body: video.filename.clone(),
        });

        self.state.current = Some(video);
        self.state.is_playing = true;
        self.state.is_loading = false;
    }

    /// Invert play/pause on the active session; no-op without a session
    pub fn toggle_play_pause(&mut self) {
        if !self.state.has_session() {
            return;
        }

        self.state.is_playing = !self.state.is_playing;
        self.effects.push(if self.state.is_playing {
            Effect::Resume
        } else {
            Effect::Pause
        });
    }

    /// Play the next video in the list, wrapping at the end
    pub fn play_next(&mut self) {
        self.step(1);
    }

    /// Play the previous video in the list, wrapping at the start
    pub fn play_previous(&mut self) {
        self.step(-1);
    }

    /// Seek by a signed number of seconds.
    ///
    /// Emits an absolute seek with the target clamped to `[0, duration]`.
    /// Local position is not touched; the next status tick reflects the
    /// engine's actual position. No-op without a session.
    pub fn seek_by(&mut self, delta_seconds: i64) {
        if !self.state.has_session() {
            return;
        }

        let target = (self.state.position_ms as i64)
            .saturating_add(delta_seconds.saturating_mul(1000))
            .clamp(0, self.state.duration_ms as i64) as u64;
        self.effects.push(Effect::SeekTo {
            position_ms: target,
        });
    }

    /// Advance to the next playback rate, wrapping around the table.
    ///
    /// Always updates local state; applies to the session only if one
    /// exists, so the rate persists for the next play either way.
    pub fn cycle_rate(&mut self) {
        self.state.rate = next_rate(self.state.rate);
        if self.state.has_session() {
            self.effects.push(Effect::SetRate {
                rate: self.state.rate,
            });
        }
    }

    /// Toggle volume between muted and full
    pub fn toggle_volume(&mut self) {
        self.state.volume = if self.state.volume == 0.0 { 1.0 } else { 0.0 };
        if self.state.has_session() {
            self.effects.push(Effect::SetVolume {
                volume: self.state.volume,
            });
        }
    }

    // ===== Asynchronous completions =====

    /// Feed one completion or engine callback into the state machine
    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::ScanCompleted { token, videos } => {
                self.on_scan_completed(token, videos);
            }
            PlayerEvent::ScanFailed { token, error } => {
                if token != self.scan_token {
                    trace!(token, "ignoring stale scan failure");
                    return;
                }
                warn!(%error, "video library scan failed");
                self.state.is_loading = false;
                self.effects.push(Effect::Alert {
                    message: error.to_string(),
                });
            }
            PlayerEvent::Status { generation, status } => {
                if generation != self.generation {
                    trace!(
                        generation,
                        current = self.generation,
                        "ignoring stale status tick"
                    );
                    return;
                }
                if !status.is_loaded {
                    trace!("ignoring status tick for unloaded media");
                    return;
                }

                self.state.position_ms = status.position_ms;
                self.state.duration_ms = status.duration_ms;
                self.state.is_playing = status.is_playing;

                if status.did_just_finish {
                    debug!("media finished, advancing to next video");
                    self.play_next();
                }
            }
            PlayerEvent::EngineLost { message } => {
                warn!(message, "playback engine lost");
                // Ticks queued behind the loss must not resurrect the session.
                self.generation += 1;
                self.state.is_playing = false;
                self.state.is_loading = false;
                self.effects.push(Effect::Alert {
                    message: format!("Playback stopped: {message}"),
                });
            }
        }
    }

    fn on_scan_completed(&mut self, token: u64, videos: Vec<VideoAsset>) {
        if token != self.scan_token {
            trace!(token, current = self.scan_token, "ignoring stale scan result");
            return;
        }

        let was_empty = self.state.videos.is_empty();
        let first = videos.first().cloned();
        debug!(count = videos.len(), "video library replaced");

        self.state.videos = videos;
        self.state.is_loading = false;

        if was_empty && self.state.current.is_none() {
            if let Some(first) = first {
                self.play(first);
            }
        }
    }

    /// Move the selection by `offset` positions, circularly.
    ///
    /// No-op when the list is empty or nothing is selected. A selection
    /// that is no longer a member of the list counts as no selection.
    fn step(&mut self, offset: isize) {
        if self.state.videos.is_empty() {
            return;
        }
        let Some(index) = self.state.current_index() else {
            return;
        };

        let len = self.state.videos.len() as isize;
        let next = (index as isize + offset).rem_euclid(len) as usize;
        self.play(self.state.videos[next].clone());
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}
