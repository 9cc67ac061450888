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

use bon::Builder;
use reelkit_player::{
    EnginePair, MediaPlaybackControls, PlaybackSource, PlayerConfig, PlayerController,
    RenderSurface, Rgba,
};
use tracing::{debug, info};

use crate::{
    components::{MediaControlButtons, MediaControlGestures, ProgressIndicator},
    context::PlayerContext,
    err::Result,
};

/// Embedding configuration of a [`VideoPlayer`].
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct VideoPlayerProps {
    pub source: PlaybackSource,

    #[builder(default = Rgba::BLACK)]
    pub background_color: Rgba,

    #[builder(default = true)]
    pub controls_enabled: bool,

    #[builder(default = true)]
    pub controls_visible: bool,

    #[builder(default = true)]
    pub gestures_enabled: bool,
}

impl VideoPlayerProps {
    pub fn new(source: PlaybackSource) -> Self { Self::builder().source(source).build() }
}

/// Child nodes of the player container, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ChildNode {
    Surface,
    Gestures,
    Buttons,
    Progress,
}

/// Container description of a mounted player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLayout {
    pub background_color: Rgba,
    /// Foreground color for the overlay nodes.
    pub content_color:    Rgba,
    /// `None` until the video height is known.
    pub aspect_ratio:     Option<f32>,
    pub children:         Vec<ChildNode>,
}

/// A video player bound into a component tree.
///
/// Mounting creates the controller exactly once; later prop changes are
/// applied to that controller. Dropping the player disposes it.
pub struct VideoPlayer {
    context:  PlayerContext,
    props:    VideoPlayerProps,
    disposed: bool,
}

impl VideoPlayer {
    /// Create the controller and apply `props`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn mount(
        props: VideoPlayerProps,
        engines: EnginePair,
        config: PlayerConfig,
    ) -> Result<Self> {
        let controller = PlayerController::new(engines, props.source.clone(), config);
        if let Err(err) = controller.set_source(props.source.clone()) {
            controller.dispose();
            return Err(err.into());
        }

        controller.enable_controls(props.controls_enabled);
        controller.enable_gestures(props.gestures_enabled);
        if props.controls_visible {
            controller.show_controls();
        } else {
            controller.hide_controls();
        }
        controller.set_background_color(props.background_color);

        info!(source = %props.source, "video player mounted");
        Ok(VideoPlayer {
            context: PlayerContext::new(controller),
            props,
            disposed: false,
        })
    }

    /// Apply changed props.
    ///
    /// A rejected source leaves every prop, the source included, as it was.
    /// Does nothing once the player is disposed.
    pub fn update(&mut self, props: VideoPlayerProps) -> Result<()> {
        if self.disposed {
            debug!(source = %props.source, "video player disposed, props ignored");
            return Ok(());
        }
        let controller = self.context.controller();

        if props.source != self.props.source {
            controller.set_source(props.source.clone())?;
        }
        if props.controls_enabled != self.props.controls_enabled {
            controller.enable_controls(props.controls_enabled);
        }
        if props.gestures_enabled != self.props.gestures_enabled {
            controller.enable_gestures(props.gestures_enabled);
        }
        if props.controls_visible != self.props.controls_visible {
            if props.controls_visible {
                controller.show_controls();
            } else {
                controller.hide_controls();
            }
        }
        if props.background_color != self.props.background_color {
            controller.set_background_color(props.background_color);
        }

        debug!(source = %props.source, "video player props applied");
        self.props = props;
        Ok(())
    }

    pub fn props(&self) -> &VideoPlayerProps { &self.props }

    pub fn context(&self) -> &PlayerContext { &self.context }

    /// The handle returned to the embedding caller.
    pub fn controls(&self) -> Arc<dyn MediaPlaybackControls> { self.context.controls() }

    pub fn surface_available(&self, surface: Arc<dyn RenderSurface>) -> Result<()> {
        self.context.controller().surface_available(surface)?;
        Ok(())
    }

    pub fn preview_surface_available(&self, surface: Arc<dyn RenderSurface>) {
        self.context.controller().preview_surface_available(surface);
    }

    pub fn layout(&self) -> PlayerLayout {
        PlayerLayout {
            background_color: self.props.background_color,
            content_color:    Rgba::WHITE,
            aspect_ratio:     self.context.state().video_size().get().aspect_ratio(),
            children:         vec![
                ChildNode::Surface,
                ChildNode::Gestures,
                ChildNode::Buttons,
                ChildNode::Progress,
            ],
        }
    }

    pub fn progress_indicator(&self) -> ProgressIndicator {
        ProgressIndicator::new(self.context.clone())
    }

    pub fn buttons(&self) -> MediaControlButtons { MediaControlButtons::new(self.context.clone()) }

    pub fn gestures(&self) -> MediaControlGestures {
        MediaControlGestures::new(self.context.clone())
    }

    /// Dispose the controller. Later calls do nothing.
    pub fn dispose(&mut self) {
        if std::mem::replace(&mut self.disposed, true) {
            return;
        }
        self.context.controller().dispose();
        info!(source = %self.props.source, "video player unmounted");
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) { self.dispose(); }
}
