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

use reelkit_player::{MediaPlaybackControls, PlayerController, PlayerState};

/// The player a component tree is bound to.
///
/// Handed to every child node explicitly; there is no ambient lookup.
#[derive(Clone)]
pub struct PlayerContext {
    controller: PlayerController,
}

impl PlayerContext {
    pub(crate) fn new(controller: PlayerController) -> Self { PlayerContext { controller } }

    pub fn controller(&self) -> &PlayerController { &self.controller }

    pub fn state(&self) -> &PlayerState { self.controller.state() }

    /// Transport commands only, for nodes that must not reconfigure the
    /// player.
    pub fn controls(&self) -> Arc<dyn MediaPlaybackControls> { Arc::new(self.controller.clone()) }
}
