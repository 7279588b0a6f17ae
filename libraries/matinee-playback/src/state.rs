//! Player screen state

use crate::rate::DEFAULT_RATE;
use matinee_core::types::VideoAsset;
use serde::{Deserialize, Serialize};

/// Volume applied before the user ever touches the toggle
pub const DEFAULT_VOLUME: f32 = 1.0;

/// The screen's view of the library and the active playback session.
///
/// Owned by the [`PlayerController`](crate::PlayerController) and mutated
/// only through its intent and event handlers. `position_ms` and
/// `duration_ms` mirror the engine's most recent status tick;
/// `position_ms <= duration_ms` holds except transiently around seeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Enumerated videos, in adapter order, replaced wholesale on refresh
    pub videos: Vec<VideoAsset>,

    /// The selected video; set once playback has been requested at least once
    pub current: Option<VideoAsset>,

    /// Whether the engine reports the session playing
    pub is_playing: bool,

    /// Last reported playback position in milliseconds
    pub position_ms: u64,

    /// Last reported media duration in milliseconds
    pub duration_ms: u64,

    /// Playback rate, one of [`PLAYBACK_RATES`](crate::rate::PLAYBACK_RATES)
    pub rate: f32,

    /// Volume, `0.0` (muted) or `1.0`
    pub volume: f32,

    /// True while a video swap or enumeration is in flight
    pub is_loading: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            videos: Vec::new(),
            current: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: 0,
            rate: DEFAULT_RATE,
            volume: DEFAULT_VOLUME,
            is_loading: false,
        }
    }
}

impl PlayerState {
    /// Index of the selected video in the list, by identifier equality.
    ///
    /// `None` when nothing is selected or the selection is no longer a
    /// member of the list (the list is replaced wholesale on refresh).
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.videos.iter().position(|v| v.id == current.id)
    }

    /// Whether a playback session has been requested
    pub fn has_session(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matinee_core::types::VideoId;

    fn asset(id: &str) -> VideoAsset {
        VideoAsset::new(VideoId::new(id), None, format!("/videos/{id}.mp4"))
    }

    #[test]
    fn default_state_is_idle() {
        let state = PlayerState::default();
        assert!(state.videos.is_empty());
        assert!(state.current.is_none());
        assert!(!state.is_playing);
        assert!(!state.is_loading);
        assert_eq!(state.rate, 1.0);
        assert_eq!(state.volume, 1.0);
    }

    #[test]
    fn current_index_uses_id_equality() {
        let mut state = PlayerState::default();
        state.videos = vec![asset("a"), asset("b"), asset("c")];

        let mut selected = asset("b");
        // Display metadata may differ from the list entry; only the id counts.
        selected.filename = "renamed.mp4".to_string();
        state.current = Some(selected);

        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn current_index_is_none_for_vanished_selection() {
        let mut state = PlayerState::default();
        state.videos = vec![asset("a")];
        state.current = Some(asset("gone"));

        assert_eq!(state.current_index(), None);
        assert!(state.has_session());
    }
}
