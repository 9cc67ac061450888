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

use std::sync::Arc;

use reelkit_player::{MediaPlaybackControls, PlaybackState};

use crate::context::PlayerContext;

/// Glyph on the central play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlayPauseIcon {
    Play,
    Pause,
    Replay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonsView {
    pub visible:   bool,
    pub enabled:   bool,
    pub icon:      PlayPauseIcon,
    /// Show a spinner over the button.
    pub buffering: bool,
}

/// Overlay with the play/pause button.
pub struct MediaControlButtons {
    context:  PlayerContext,
    controls: Arc<dyn MediaPlaybackControls>,
}

impl MediaControlButtons {
    pub fn new(context: PlayerContext) -> Self {
        let controls = context.controls();
        MediaControlButtons { context, controls }
    }

    pub fn view(&self) -> ButtonsView {
        let state = self.context.state();
        let playback_state = state.playback_state().get();
        let icon = match playback_state {
            PlaybackState::Ended => PlayPauseIcon::Replay,
            _ if state.is_playing().get() => PlayPauseIcon::Pause,
            _ => PlayPauseIcon::Play,
        };

        ButtonsView {
            visible: state.controls_enabled().get() && state.controls_visible().get(),
            enabled: state.controls_enabled().get(),
            icon,
            buffering: playback_state == PlaybackState::Buffering,
        }
    }

    /// Press the play/pause button. Returns `false` when the button is not
    /// shown and the press was dropped.
    pub fn press_play_pause(&self) -> bool {
        if !self.view().visible {
            return false;
        }
        self.controls.play_pause_toggle();
        true
    }
}
