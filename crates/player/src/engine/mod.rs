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

//! Capabilities the controller needs from a media engine.
//!
//! An engine decodes and renders media and reports status through an
//! [`EngineListener`]. Status codes follow the table below; anything else is
//! an error.
//!
//! | code | state     |
//! |------|-----------|
//! | 1    | idle      |
//! | 2    | buffering |
//! | 3    | ready     |
//! | 4    | ended     |

mod simulated;

use std::sync::Arc;

pub use simulated::{EngineCall, SimulatedEngine};

use crate::{err::Result, source::MediaSource, surface::RenderSurface};

pub const STATE_IDLE: i32 = 1;
pub const STATE_BUFFERING: i32 = 2;
pub const STATE_READY: i32 = 3;
pub const STATE_ENDED: i32 = 4;

/// Reported for durations and positions the engine does not know yet.
pub const TIME_UNSET: i64 = i64::MIN + 1;

/// Receives engine status callbacks on the player's scheduling context.
pub trait EngineListener: Send + Sync {
    /// Fails when `state_code` is outside the known table.
    fn on_player_state_changed(&self, play_when_ready: bool, state_code: i32) -> Result<()>;

    fn on_video_size_changed(
        &self,
        width: u32,
        height: u32,
        unapplied_rotation_degrees: i32,
        pixel_width_height_ratio: f32,
    );
}

/// A media engine instance. Times are milliseconds and may be negative or
/// [`TIME_UNSET`] while unknown.
pub trait MediaEngine: Send {
    fn prepare(&mut self, source: MediaSource);

    fn set_play_when_ready(&mut self, play_when_ready: bool);

    fn play_when_ready(&self) -> bool;

    /// Playing right now: play requested and ready.
    fn is_playing(&self) -> bool;

    fn playback_state_code(&self) -> i32;

    fn seek_to(&mut self, position_ms: i64);

    fn current_position_ms(&self) -> i64;

    fn duration_ms(&self) -> i64;

    fn buffered_position_ms(&self) -> i64;

    fn set_listener(&mut self, listener: Arc<dyn EngineListener>);

    fn attach_surface(&mut self, surface: Arc<dyn RenderSurface>);

    /// Free decoder resources. The engine is unusable afterwards.
    fn release(&mut self);
}

/// The two engines a controller owns: one plays, the other only renders
/// frames for scrub previews.
pub struct EnginePair {
    pub primary: Box<dyn MediaEngine>,
    pub preview: Box<dyn MediaEngine>,
}

impl EnginePair {
    pub fn new(primary: impl MediaEngine + 'static, preview: impl MediaEngine + 'static) -> Self {
        EnginePair {
            primary: Box::new(primary),
            preview: Box::new(preview),
        }
    }
}
