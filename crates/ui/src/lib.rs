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

//! Binds a [`reelkit_player::PlayerController`] into a component tree.
//!
//! [`VideoPlayer`] owns the controller for the lifetime of its mount and
//! hands a [`PlayerContext`] to the child nodes in [`components`]. The nodes
//! are headless: they turn controller state into view values and user input
//! into controller commands, leaving drawing to the host toolkit.

pub mod components;
mod context;
mod err;
mod video_player;

pub use context::PlayerContext;
pub use err::{Error, Result};
pub use video_player::{ChildNode, PlayerLayout, VideoPlayer, VideoPlayerProps};
