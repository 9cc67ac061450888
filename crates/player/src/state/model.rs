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

//! Passive values published by the player.

use std::time::Duration;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::err::{Result, UnknownPlaybackStateSnafu};

/// Engine playback status.
///
/// The discriminants are the engine's raw status codes. Every known code maps
/// to exactly one variant; anything else is rejected by
/// [`from_code`](PlaybackState::from_code).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    derive_more::Display,
)]
#[repr(i32)]
pub enum PlaybackState {
    /// No media prepared, or the engine was stopped.
    Idle      = 1,
    /// Waiting for enough data to start or resume.
    Buffering = 2,
    /// Able to play from the current position.
    Ready     = 3,
    /// Reached the end of the media.
    Ended     = 4,
}

impl PlaybackState {
    pub fn from_code(code: i32) -> Result<Self> {
        Self::try_from(code).map_err(|e| UnknownPlaybackStateSnafu { code: e.number }.build())
    }

    pub fn code(self) -> i32 { self.into() }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum QuickSeekDirection {
    #[default]
    None,
    Forward,
    Rewind,
}

/// One quick-seek event.
///
/// `token` grows with every accepted quick-seek, so a UI can tell a fresh
/// event from one it already animated even when the direction repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QuickSeekAction {
    pub direction: QuickSeekDirection,
    pub token:     u64,
}

impl QuickSeekAction {
    pub const fn none() -> Self {
        QuickSeekAction {
            direction: QuickSeekDirection::None,
            token:     0,
        }
    }

    pub const fn new(direction: QuickSeekDirection, token: u64) -> Self {
        QuickSeekAction { direction, token }
    }

    /// Whether an animation for this action is still expected to run.
    pub fn is_active(&self) -> bool { self.direction != QuickSeekDirection::None }
}

/// Scrub target while the user drags the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraggingProgress {
    pub target_position: Duration,
}

/// Decoded frame size in engine pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{width}x{height}")]
pub struct VideoSize {
    pub width:  u32,
    pub height: u32,
}

impl VideoSize {
    pub const fn new(width: u32, height: u32) -> Self { VideoSize { width, height } }

    /// Width over height, or `None` while the height is unknown (zero).
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.height != 0).then(|| self.width as f32 / self.height as f32)
    }
}

impl Default for VideoSize {
    fn default() -> Self { VideoSize::new(1920, 1080) }
}
