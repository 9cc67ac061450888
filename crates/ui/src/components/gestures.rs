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

use reelkit_player::{DraggingProgress, MediaPlaybackControls, QuickSeekAction};
use tracing::debug;

use crate::context::PlayerContext;

/// Half of the player a double tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapSide {
    Left,
    Right,
}

/// Full-size gesture layer over the video.
///
/// Taps toggle the controls, double taps quick-seek and horizontal drags
/// scrub. Every gesture is dropped while controls or gestures are disabled.
pub struct MediaControlGestures {
    context:        PlayerContext,
    controls:       Arc<dyn MediaPlaybackControls>,
    animated_token: u64,
}

impl MediaControlGestures {
    pub fn new(context: PlayerContext) -> Self {
        let controls = context.controls();
        MediaControlGestures {
            context,
            controls,
            animated_token: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        let state = self.context.state();
        state.controls_enabled().get() && state.gestures_enabled().get()
    }

    pub fn tap(&self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let controller = self.context.controller();
        if controller.state().controls_visible().get() {
            controller.hide_controls();
        } else {
            controller.show_controls();
        }
        true
    }

    pub fn double_tap(&self, side: TapSide) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match side {
            TapSide::Left => self.controls.quick_seek_rewind(),
            TapSide::Right => self.controls.quick_seek_forward(),
        }
        true
    }

    /// Start scrubbing from the current position.
    pub fn drag_start(&self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let controller = self.context.controller();
        controller.show_controls();
        controller.set_dragging_progress(Some(DraggingProgress {
            target_position: controller.state().current_position().get(),
        }));
        true
    }

    /// Move the scrub target to `fraction` of the media and preview it.
    pub fn drag_update(&self, fraction: f32) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let controller = self.context.controller();
        let target_position = controller.state().duration().get().mul_f32(fraction);
        controller.set_dragging_progress(Some(DraggingProgress { target_position }));
        controller.preview_seek_to(target_position);
        true
    }

    /// Seek to the scrub target and stop scrubbing.
    pub fn drag_end(&self) {
        let controller = self.context.controller();
        if let Some(progress) = controller.state().dragging_progress().get() {
            debug!(target_ms = progress.target_position.as_millis(), "scrub released");
            self.controls.seek_to(progress.target_position);
        }
        controller.set_dragging_progress(None);
    }

    /// The quick-seek action to animate, once per action.
    pub fn take_quick_seek_animation(&mut self) -> Option<QuickSeekAction> {
        let action = self.context.state().quick_seek_action().get();
        if !action.is_active() || action.token == self.animated_token {
            return None;
        }
        self.animated_token = action.token;
        Some(action)
    }

    /// The animation for the current quick-seek ran to completion.
    pub fn quick_seek_animation_finished(&self) { self.context.controller().reset_quick_seek(); }
}
