// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use crate::state::{
    cell::StateCell,
    model::{DraggingProgress, PlaybackState, QuickSeekAction, VideoSize},
};

/// Every observable cell published by a player controller.
///
/// Only the controller writes; UI nodes read or subscribe.
#[derive(Debug)]
pub struct PlayerState {
    pub(crate) is_playing:         StateCell<bool>,
    pub(crate) controls_visible:   StateCell<bool>,
    pub(crate) controls_enabled:   StateCell<bool>,
    pub(crate) gestures_enabled:   StateCell<bool>,
    pub(crate) duration:           StateCell<Duration>,
    pub(crate) current_position:   StateCell<Duration>,
    pub(crate) secondary_progress: StateCell<Duration>,
    pub(crate) video_size:         StateCell<VideoSize>,
    pub(crate) dragging_progress:  StateCell<Option<DraggingProgress>>,
    pub(crate) playback_state:     StateCell<PlaybackState>,
    pub(crate) quick_seek_action:  StateCell<QuickSeekAction>,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            is_playing:         StateCell::new(false),
            controls_visible:   StateCell::new(true),
            controls_enabled:   StateCell::new(true),
            gestures_enabled:   StateCell::new(true),
            duration:           StateCell::new(Duration::from_millis(1)),
            current_position:   StateCell::new(Duration::from_millis(1)),
            secondary_progress: StateCell::new(Duration::from_millis(1)),
            video_size:         StateCell::new(VideoSize::default()),
            dragging_progress:  StateCell::new(None),
            playback_state:     StateCell::new(PlaybackState::Idle),
            quick_seek_action:  StateCell::new(QuickSeekAction::none()),
        }
    }
}

impl PlayerState {
    /// The engine's requested-play flag, as last reported by the engine.
    pub fn is_playing(&self) -> &StateCell<bool> { &self.is_playing }

    pub fn controls_visible(&self) -> &StateCell<bool> { &self.controls_visible }

    pub fn controls_enabled(&self) -> &StateCell<bool> { &self.controls_enabled }

    pub fn gestures_enabled(&self) -> &StateCell<bool> { &self.gestures_enabled }

    pub fn duration(&self) -> &StateCell<Duration> { &self.duration }

    /// May briefly exceed [`duration`](Self::duration); readers clamp.
    pub fn current_position(&self) -> &StateCell<Duration> { &self.current_position }

    /// Buffered position.
    pub fn secondary_progress(&self) -> &StateCell<Duration> { &self.secondary_progress }

    pub fn video_size(&self) -> &StateCell<VideoSize> { &self.video_size }

    pub fn dragging_progress(&self) -> &StateCell<Option<DraggingProgress>> {
        &self.dragging_progress
    }

    pub fn playback_state(&self) -> &StateCell<PlaybackState> { &self.playback_state }

    pub fn quick_seek_action(&self) -> &StateCell<QuickSeekAction> { &self.quick_seek_action }

    /// Read every cell at once.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            is_playing:         self.is_playing.get(),
            controls_visible:   self.controls_visible.get(),
            controls_enabled:   self.controls_enabled.get(),
            gestures_enabled:   self.gestures_enabled.get(),
            duration:           self.duration.get(),
            current_position:   self.current_position.get(),
            secondary_progress: self.secondary_progress.get(),
            video_size:         self.video_size.get(),
            dragging_progress:  self.dragging_progress.get(),
            playback_state:     self.playback_state.get(),
            quick_seek_action:  self.quick_seek_action.get(),
        }
    }
}

/// Plain copy of [`PlayerState`] at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub is_playing:         bool,
    pub controls_visible:   bool,
    pub controls_enabled:   bool,
    pub gestures_enabled:   bool,
    pub duration:           Duration,
    pub current_position:   Duration,
    pub secondary_progress: Duration,
    pub video_size:         VideoSize,
    pub dragging_progress:  Option<DraggingProgress>,
    pub playback_state:     PlaybackState,
    pub quick_seek_action:  QuickSeekAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_values() {
        let state = PlayerState::default().snapshot();
        assert!(!state.is_playing);
        assert!(state.controls_visible);
        assert!(state.controls_enabled);
        assert!(state.gestures_enabled);
        assert_eq!(state.duration, Duration::from_millis(1));
        assert_eq!(state.current_position, Duration::from_millis(1));
        assert_eq!(state.secondary_progress, Duration::from_millis(1));
        assert_eq!(state.video_size, VideoSize::new(1920, 1080));
        assert_eq!(state.dragging_progress, None);
        assert_eq!(state.playback_state, PlaybackState::Idle);
        assert_eq!(state.quick_seek_action, QuickSeekAction::none());
    }

    #[tokio::test]
    async fn subscribers_see_latest_value_and_skip_duplicates() {
        let state = PlayerState::default();
        state.is_playing.set(true);

        let mut rx = state.is_playing().subscribe();
        assert!(*rx.borrow_and_update());

        state.is_playing.set(true);
        assert!(!rx.has_changed().unwrap());

        state.is_playing.set(false);
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }
}
