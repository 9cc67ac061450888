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

//! Reactive video player controller.
//!
//! A [`PlayerController`] owns two media engines behind the [`MediaEngine`]
//! capability: a primary engine that plays and a preview engine that only
//! renders scrub frames. Engine callbacks and periodic polling are turned
//! into observable [`PlayerState`] cells, and UI commands flow back as
//! engine calls.

mod config;
mod controller;
mod controls;
pub mod engine;
mod err;
mod source;
pub mod state;
mod surface;

pub use config::PlayerConfig;
pub use controller::PlayerController;
pub use controls::MediaPlaybackControls;
pub use engine::{EngineCall, EngineListener, EnginePair, MediaEngine, SimulatedEngine};
pub use err::{Error, Result};
pub use source::{
    DefaultMediaSourceFactory, MediaSource, MediaSourceFactory, PlaybackSource,
    RAW_RESOURCE_SCHEME, resource_uri,
};
pub use state::{
    DraggingProgress, PlaybackState, PlayerSnapshot, PlayerState, QuickSeekAction,
    QuickSeekDirection, StateCell, VideoSize,
};
pub use surface::{RenderSurface, Rgba};
