//! Welcome splash sequence
//!
//! A one-shot entrance screen: fade-in and scale-spring run concurrently
//! from mount, the splash holds until a fixed wall-clock delay elapses,
//! fades back out, and stays dismissed for the rest of the session. The
//! clock is injected (callers pass `Instant`s), so the whole timeline is
//! testable with synthetic time.

use crate::curve::{EaseCurve, Spring};
use std::time::Instant;

/// Fade-in duration from mount
pub const FADE_IN_MS: u64 = 1000;

/// Wall-clock delay from mount until the fade-out starts, independent of
/// whether the entrance animation has finished
pub const DISPLAY_MS: u64 = 3000;

/// Fade-out duration
pub const FADE_OUT_MS: u64 = 800;

/// Scale spring parameters and travel
const SCALE_FRICTION: f32 = 8.0;
const SCALE_TENSION: f32 = 40.0;
const SCALE_FROM: f32 = 0.8;
const SCALE_TO: f32 = 1.0;

/// Where the splash is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Entrance animation running
    Entering,

    /// Fully faded in, holding until the display delay elapses
    Visible,

    /// Fading back out
    FadingOut,

    /// Gone for the rest of the session
    Dismissed,
}

/// One sampled frame of the splash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashFrame {
    /// Lifecycle phase at the sampled instant
    pub phase: SplashPhase,

    /// Opacity scalar in `[0, 1]`
    pub opacity: f32,

    /// Scale scalar (spring, briefly overshoots 1.0)
    pub scale: f32,
}

impl SplashFrame {
    /// Whether the renderer should draw the splash at all
    pub fn is_visible(&self) -> bool {
        self.phase != SplashPhase::Dismissed
    }
}

/// Drives the splash timeline against an injected clock
#[derive(Debug)]
pub struct SplashController {
    mounted_at: Instant,
    curve: EaseCurve,
    spring: Spring,
    integrated_ms: u64,
    cancelled: bool,
}

impl SplashController {
    /// Mount the splash at `now`
    pub fn new(now: Instant) -> Self {
        Self {
            mounted_at: now,
            curve: EaseCurve::EaseInOut,
            spring: Spring::new(SCALE_FROM, SCALE_TO, SCALE_FRICTION, SCALE_TENSION),
            integrated_ms: 0,
            cancelled: false,
        }
    }

    /// Cancel the pending dismissal and dismiss immediately.
    ///
    /// For teardown before the display delay fires: the splash must not
    /// act on a view that no longer exists. Subsequent frames report
    /// [`SplashPhase::Dismissed`].
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Sample the splash at `now`.
    ///
    /// Monotonic in wall-clock time: the same `now` always yields the same
    /// frame, and once dismissed the splash never comes back.
    pub fn frame(&mut self, now: Instant) -> SplashFrame {
        if self.cancelled {
            return SplashFrame {
                phase: SplashPhase::Dismissed,
                opacity: 0.0,
                scale: self.spring.value(),
            };
        }

        let elapsed = now.saturating_duration_since(self.mounted_at).as_millis() as u64;

        // The spring runs on its own clock and freezes once the splash is gone.
        let spring_target = elapsed.min(DISPLAY_MS + FADE_OUT_MS);
        if spring_target > self.integrated_ms {
            self.spring.advance_ms(spring_target - self.integrated_ms);
            self.integrated_ms = spring_target;
        }

        let (phase, opacity) = if elapsed < FADE_IN_MS {
            let progress = elapsed as f32 / FADE_IN_MS as f32;
            (SplashPhase::Entering, self.curve.value(progress, false))
        } else if elapsed < DISPLAY_MS {
            (SplashPhase::Visible, 1.0)
        } else if elapsed < DISPLAY_MS + FADE_OUT_MS {
            let progress = (elapsed - DISPLAY_MS) as f32 / FADE_OUT_MS as f32;
            (SplashPhase::FadingOut, self.curve.value(progress, true))
        } else {
            (SplashPhase::Dismissed, 0.0)
        };

        SplashFrame {
            phase,
            opacity,
            scale: self.spring.value(),
        }
    }
}
