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

/// Transport commands a control surface may issue.
///
/// Buttons and gestures hold this capability instead of the controller, so
/// they can be driven by anything that plays media.
pub trait MediaPlaybackControls: Send + Sync {
    fn play(&self);

    fn pause(&self);

    fn play_pause_toggle(&self);

    fn quick_seek_forward(&self);

    fn quick_seek_rewind(&self);

    fn seek_to(&self, position: Duration);
}
