//! Integration tests for the player controller
//!
//! These drive the state machine through full user scenarios and assert
//! on both the resulting state and the exact effects queued for the shell.

use matinee_core::error::ScanError;
use matinee_core::types::{VideoAsset, VideoId};
use matinee_playback::{Effect, EngineStatus, PlayerController, PlayerEvent};

// ===== Test Helpers =====

fn video(id: &str) -> VideoAsset {
    VideoAsset::new(VideoId::new(id), None, format!("/videos/{id}.mp4"))
}

fn videos(ids: &[&str]) -> Vec<VideoAsset> {
    ids.iter().map(|id| video(id)).collect()
}

/// Refresh and complete the scan in one step
fn load_library(controller: &mut PlayerController, ids: &[&str]) {
    controller.refresh();
    let token = match controller.take_effects().as_slice() {
        [Effect::Scan { token, .. }] => *token,
        other => panic!("expected a single scan effect, got {other:?}"),
    };
    controller.handle_event(PlayerEvent::ScanCompleted {
        token,
        videos: videos(ids),
    });
}

fn tick(generation: u64, position_ms: u64, duration_ms: u64, is_playing: bool) -> PlayerEvent {
    PlayerEvent::Status {
        generation,
        status: EngineStatus {
            is_loaded: true,
            position_ms,
            duration_ms,
            is_playing,
            did_just_finish: false,
        },
    }
}

fn finished_tick(generation: u64, duration_ms: u64) -> PlayerEvent {
    PlayerEvent::Status {
        generation,
        status: EngineStatus {
            is_loaded: true,
            position_ms: duration_ms,
            duration_ms,
            is_playing: false,
            did_just_finish: true,
        },
    }
}

fn current_id(controller: &PlayerController) -> Option<&str> {
    controller.state().current.as_ref().map(|v| v.id.as_str())
}

fn engine_effects(effects: &[Effect]) -> Vec<&Effect> {
    effects.iter().filter(|e| e.is_engine_call()).collect()
}

// ===== Status Ticks =====

#[test]
fn test_status_tick_overwrites_transport_state() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a"]);
    controller.take_effects();

    controller.handle_event(tick(1, 42_000, 90_000, true));

    let state = controller.state();
    assert_eq!(state.position_ms, 42_000);
    assert_eq!(state.duration_ms, 90_000);
    assert!(state.is_playing);
}

#[test]
fn test_unloaded_status_tick_is_ignored() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a"]);
    controller.handle_event(tick(1, 42_000, 90_000, true));
    controller.take_effects();

    controller.handle_event(PlayerEvent::Status {
        generation: 1,
        status: EngineStatus::default(),
    });

    // The zeroed unloaded tick did not clobber anything.
    let state = controller.state();
    assert_eq!(state.position_ms, 42_000);
    assert_eq!(state.duration_ms, 90_000);
    assert!(state.is_playing);
}

#[test]
fn test_stale_generation_tick_is_discarded() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b"]);
    controller.take_effects();

    // Switch away from the auto-played first video; session is now gen 2.
    controller.play_next();
    controller.take_effects();

    // A late tick from the superseded session must not touch state.
    controller.handle_event(tick(1, 55_000, 60_000, true));
    assert_eq!(controller.state().position_ms, 0);

    controller.handle_event(tick(2, 5_000, 60_000, true));
    assert_eq!(controller.state().position_ms, 5_000);
}

// ===== Auto-advance =====

#[test]
fn test_finish_on_last_video_wraps_to_first() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b", "c"]);
    controller.take_effects();

    controller.play(video("c"));
    controller.take_effects();

    controller.handle_event(finished_tick(2, 60_000));

    assert_eq!(current_id(&controller), Some("a"));
    let effects = controller.take_effects();
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Load { uri, .. } if uri == "/videos/a.mp4"
    )));
}

#[test]
fn test_finish_is_the_only_autoplay_path() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b"]);
    controller.take_effects();

    // A tick that merely reports paused-at-end does not advance.
    controller.handle_event(tick(1, 60_000, 60_000, false));
    assert_eq!(current_id(&controller), Some("a"));
    assert!(controller.take_effects().is_empty());
}

// ===== Navigation =====

#[test]
fn test_next_and_previous_wrap_circularly() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b", "c"]);
    controller.take_effects();

    controller.play_next();
    assert_eq!(current_id(&controller), Some("b"));
    controller.play_next();
    assert_eq!(current_id(&controller), Some("c"));
    controller.play_next();
    assert_eq!(current_id(&controller), Some("a"));

    controller.play_previous();
    assert_eq!(current_id(&controller), Some("c"));
}

#[test]
fn test_next_on_empty_list_does_nothing() {
    let mut controller = PlayerController::new();

    controller.play_next();

    assert!(controller.state().current.is_none());
    assert!(controller.take_effects().is_empty());
}

#[test]
fn test_next_with_vanished_selection_does_nothing() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b"]);
    controller.take_effects();

    // The library is replaced by a list that no longer contains "a".
    controller.refresh();
    controller.take_effects();
    controller.handle_event(PlayerEvent::ScanCompleted {
        token: 2,
        videos: videos(&["x", "y"]),
    });
    controller.take_effects();

    controller.play_next();

    assert_eq!(current_id(&controller), Some("a"));
    assert!(engine_effects(&controller.take_effects()).is_empty());
}

// ===== Seeking =====

#[test]
fn test_seek_clamps_to_both_ends() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a"]);
    controller.handle_event(tick(1, 5_000, 10_000, true));
    controller.take_effects();

    controller.seek_by(-10);
    assert_eq!(
        controller.take_effects(),
        vec![Effect::SeekTo { position_ms: 0 }]
    );

    controller.seek_by(10);
    assert_eq!(
        controller.take_effects(),
        vec![Effect::SeekTo { position_ms: 10_000 }]
    );
}

#[test]
fn test_seek_does_not_touch_local_position() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a"]);
    controller.handle_event(tick(1, 5_000, 10_000, true));
    controller.take_effects();

    controller.seek_by(2);

    // Local position still reflects the last tick, not the seek target.
    assert_eq!(controller.state().position_ms, 5_000);
}

#[test]
fn test_seek_without_session_is_a_no_op() {
    let mut controller = PlayerController::new();
    controller.seek_by(10);
    assert!(controller.take_effects().is_empty());
}

// ===== Rate and Volume =====

#[test]
fn test_rate_persists_across_video_switches() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b"]);
    controller.take_effects();

    controller.cycle_rate(); // 1.0 -> 1.25
    controller.cycle_rate(); // 1.25 -> 1.5
    controller.take_effects();

    controller.play(video("b"));

    let effects = controller.take_effects();
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Load { rate, .. } if *rate == 1.5
    )));
    assert_eq!(controller.state().rate, 1.5);
}

#[test]
fn test_rate_cycles_without_a_session() {
    let mut controller = PlayerController::new();

    for _ in 0..6 {
        controller.cycle_rate();
    }

    // Six steps come back around; nothing was sent to an engine.
    assert_eq!(controller.state().rate, 1.0);
    assert!(controller.take_effects().is_empty());
}

#[test]
fn test_rate_change_reaches_an_active_session() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a"]);
    controller.take_effects();

    controller.cycle_rate();

    assert_eq!(
        controller.take_effects(),
        vec![Effect::SetRate { rate: 1.25 }]
    );
}

#[test]
fn test_mute_persists_across_video_switches() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b"]);
    controller.take_effects();

    controller.toggle_volume();
    controller.take_effects();

    controller.play(video("b"));

    let effects = controller.take_effects();
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Load { volume, .. } if *volume == 0.0
    )));
}

// ===== Library Failures =====

#[test]
fn test_permission_denied_retains_prior_list() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a", "b"]);
    controller.take_effects();

    controller.refresh();
    controller.take_effects();
    controller.handle_event(PlayerEvent::ScanFailed {
        token: 2,
        error: ScanError::PermissionDenied,
    });

    let state = controller.state();
    assert_eq!(state.videos.len(), 2);
    assert!(!state.is_loading);

    let effects = controller.take_effects();
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], Effect::Alert { .. }));
}

#[test]
fn test_permission_denied_on_first_load_leaves_list_empty() {
    let mut controller = PlayerController::new();
    controller.refresh();
    controller.take_effects();

    controller.handle_event(PlayerEvent::ScanFailed {
        token: 1,
        error: ScanError::PermissionDenied,
    });

    assert!(controller.state().videos.is_empty());
    assert!(!controller.state().is_loading);
    assert!(controller.state().current.is_none());
}

#[test]
fn test_enumeration_failure_alerts_with_context() {
    let mut controller = PlayerController::new();
    controller.refresh();
    controller.take_effects();

    controller.handle_event(PlayerEvent::ScanFailed {
        token: 1,
        error: ScanError::failed("device busy"),
    });

    let effects = controller.take_effects();
    assert!(matches!(
        &effects[0],
        Effect::Alert { message } if message.contains("device busy")
    ));
}

// ===== Engine Loss =====

#[test]
fn test_engine_loss_stops_playback_and_alerts() {
    let mut controller = PlayerController::new();
    load_library(&mut controller, &["a"]);
    controller.handle_event(tick(1, 9_000, 60_000, true));
    controller.take_effects();

    controller.handle_event(PlayerEvent::EngineLost {
        message: "process exited".to_string(),
    });

    let state = controller.state();
    assert!(!state.is_playing);
    assert_eq!(current_id(&controller), Some("a"));

    let effects = controller.take_effects();
    assert!(matches!(&effects[0], Effect::Alert { .. }));

    // Ticks queued behind the loss are stale now.
    controller.handle_event(tick(1, 10_000, 60_000, true));
    assert_eq!(controller.state().position_ms, 9_000);
}
