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

use crate::context::PlayerContext;

/// What the progress bar shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressView {
    /// Played share of the media, `0.0..=1.0`.
    pub played:   f32,
    /// Buffered share of the media, `0.0..=1.0`.
    pub buffered: f32,
    pub position: Duration,
    pub duration: Duration,
    /// The played share follows a drag instead of the engine.
    pub dragging: bool,
}

impl ProgressView {
    /// `position/duration`, e.g. `2:37/4:01`.
    pub fn time_label(&self) -> String {
        format!(
            "{}/{}",
            format_time(self.position),
            format_time(self.duration)
        )
    }
}

/// Bottom progress bar.
pub struct ProgressIndicator {
    context: PlayerContext,
}

impl ProgressIndicator {
    pub fn new(context: PlayerContext) -> Self { ProgressIndicator { context } }

    pub fn view(&self) -> ProgressView {
        let state = self.context.state();
        let duration = state.duration().get();
        let dragging = state.dragging_progress().get();
        let position = dragging
            .map_or_else(|| state.current_position().get(), |d| d.target_position)
            .min(duration);

        ProgressView {
            played: fraction(position, duration),
            buffered: fraction(state.secondary_progress().get(), duration),
            position,
            duration,
            dragging: dragging.is_some(),
        }
    }
}

/// `part / whole` clamped to `0.0..=1.0`; zero while `whole` is unknown.
fn fraction(part: Duration, whole: Duration) -> f32 {
    if whole.is_zero() {
        0.0
    } else {
        (part.as_secs_f32() / whole.as_secs_f32()).clamp(0.0, 1.0)
    }
}

fn format_time(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
