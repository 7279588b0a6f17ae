//! Status accumulation and session generation tracking
//!
//! mpv reports position, duration, and pause state as independent
//! property streams. The tracker folds them into the last-known full
//! status and stamps every tick with the generation of the session it
//! belongs to, so a tick from a replaced file can never masquerade as
//! the new one.

use crate::ipc::MpvEvent;
use matinee_playback::EngineStatus;
use std::collections::VecDeque;

/// Accumulates mpv events into tagged status ticks
#[derive(Debug, Default)]
pub struct StatusTracker {
    /// Generations of loads mpv has not confirmed yet, in command order
    pending_generations: VecDeque<u64>,

    /// Generation stamped onto outgoing ticks
    active_generation: u64,

    is_loaded: bool,
    position_ms: u64,
    duration_ms: u64,
    paused: bool,
}

impl StatusTracker {
    /// Create a tracker with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the generation an unconfirmed load will activate.
    ///
    /// mpv processes commands in order and emits one `start-file` per
    /// `loadfile`, so each confirmation activates the oldest queued
    /// generation. Until a load is confirmed its ticks keep the
    /// superseded generation and are discarded upstream.
    pub fn expect_generation(&mut self, generation: u64) {
        self.pending_generations.push_back(generation);
    }

    /// Fold one mpv event into the tracker.
    ///
    /// Returns the status tick to forward, if the event produced one.
    pub fn apply(&mut self, event: &MpvEvent) -> Option<(u64, EngineStatus)> {
        match event {
            MpvEvent::StartFile => {
                if let Some(generation) = self.pending_generations.pop_front() {
                    self.active_generation = generation;
                }
                self.is_loaded = true;
                self.position_ms = 0;
                self.duration_ms = 0;
                // A load always forces pause off; mirror that here so the
                // activation tick already reports playing.
                self.paused = false;
                Some(self.tick(false))
            }
            MpvEvent::EndFile { reason } => {
                self.is_loaded = false;
                if reason != "eof" {
                    // Replacement and stop teardowns are not consumer-visible.
                    return None;
                }
                if self.duration_ms > 0 {
                    self.position_ms = self.duration_ms;
                }
                // The finish is reported against the finished file, so the
                // tick stays loaded and carries its generation.
                Some((
                    self.active_generation,
                    EngineStatus {
                        is_loaded: true,
                        position_ms: self.position_ms,
                        duration_ms: self.duration_ms,
                        is_playing: false,
                        did_just_finish: true,
                    },
                ))
            }
            MpvEvent::PropertyChange { name, data } => {
                match (name.as_str(), data) {
                    ("time-pos", Some(value)) => {
                        self.position_ms = seconds_to_ms(value.as_f64()?);
                    }
                    ("duration", Some(value)) => {
                        self.duration_ms = seconds_to_ms(value.as_f64()?);
                    }
                    ("pause", Some(value)) => {
                        self.paused = value.as_bool()?;
                    }
                    // Unavailable data and unobserved properties produce no tick.
                    _ => return None,
                }
                Some(self.tick(false))
            }
            MpvEvent::Other(_) => None,
        }
    }

    fn tick(&self, did_just_finish: bool) -> (u64, EngineStatus) {
        (
            self.active_generation,
            EngineStatus {
                is_loaded: self.is_loaded,
                position_ms: self.position_ms,
                duration_ms: self.duration_ms,
                is_playing: self.is_loaded && !self.paused,
                did_just_finish,
            },
        )
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds <= 0.0 {
        0
    } else {
        (seconds * 1000.0).round() as u64
    }
}
