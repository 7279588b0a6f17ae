//! Splash sequence timeline tests
//!
//! Drives the splash controller with synthetic clocks and checks the
//! opacity and scale envelopes at each phase boundary.

use std::time::{Duration, Instant};

use matinee_playback::{SplashController, SplashFrame, SplashPhase, DISPLAY_MS, FADE_OUT_MS};

fn frame_at(splash: &mut SplashController, mount: Instant, ms: u64) -> SplashFrame {
    splash.frame(mount + Duration::from_millis(ms))
}

#[test]
fn test_splash_starts_transparent_and_scaled_down() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    let frame = frame_at(&mut splash, mount, 0);

    assert_eq!(frame.phase, SplashPhase::Entering);
    assert!(frame.opacity < 0.01);
    assert!(frame.scale < 0.85);
}

#[test]
fn test_fade_and_spring_run_concurrently() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    let frame = frame_at(&mut splash, mount, 500);

    assert_eq!(frame.phase, SplashPhase::Entering);
    assert!(frame.opacity > 0.0 && frame.opacity < 1.0);
    assert!(frame.scale > 0.8, "spring has left its starting value");
}

#[test]
fn test_opacity_holds_at_one_through_the_visible_phase() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    for ms in [1_000, 1_500, 2_400, 2_999] {
        let frame = frame_at(&mut splash, mount, ms);
        assert_eq!(frame.phase, SplashPhase::Visible, "at {ms}ms");
        assert!((frame.opacity - 1.0).abs() < f32::EPSILON, "at {ms}ms");
    }
}

#[test]
fn test_spring_overshoots_then_settles_by_the_hold() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    let mut max_scale = 0.0f32;
    for ms in (0..1_500).step_by(10) {
        max_scale = max_scale.max(frame_at(&mut splash, mount, ms).scale);
    }

    assert!(max_scale > 1.005, "underdamped spring overshoots the target");
    assert!(max_scale < 1.05);

    let settled = frame_at(&mut splash, mount, DISPLAY_MS);
    assert!((settled.scale - 1.0).abs() < 0.01);
}

#[test]
fn test_fade_out_begins_at_the_display_deadline() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    let frame = frame_at(&mut splash, mount, DISPLAY_MS);
    assert_eq!(frame.phase, SplashPhase::FadingOut);

    let mut last = frame.opacity;
    for ms in (DISPLAY_MS..DISPLAY_MS + FADE_OUT_MS).step_by(100).skip(1) {
        let opacity = frame_at(&mut splash, mount, ms).opacity;
        assert!(opacity <= last, "fade-out never brightens, at {ms}ms");
        last = opacity;
    }
}

#[test]
fn test_dismissed_after_the_fade_out_and_stays_dismissed() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    for ms in [DISPLAY_MS + FADE_OUT_MS, 10_000, 600_000] {
        let frame = frame_at(&mut splash, mount, ms);
        assert_eq!(frame.phase, SplashPhase::Dismissed, "at {ms}ms");
        assert_eq!(frame.opacity, 0.0, "at {ms}ms");
    }
}

#[test]
fn test_cancel_before_the_deadline_skips_the_fade_out() {
    let mount = Instant::now();
    let mut splash = SplashController::new(mount);

    frame_at(&mut splash, mount, 2_000);
    splash.cancel();

    for ms in [2_001, 3_100, 3_900] {
        let frame = frame_at(&mut splash, mount, ms);
        assert_eq!(frame.phase, SplashPhase::Dismissed, "at {ms}ms");
        assert_eq!(frame.opacity, 0.0, "at {ms}ms");
    }
}
