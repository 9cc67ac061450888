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

use std::{
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use futures::StreamExt;
use snafu::ensure;
use parking_lot::Mutex;
use reelkit_common_worker::{Debouncer, SlotStats, TaskHandle, TaskSlot, spawn, spawn_interval};
use tracing::{debug, error, info, warn};

use crate::{
    config::PlayerConfig,
    controls::MediaPlaybackControls,
    engine::{EngineListener, EnginePair, MediaEngine, STATE_ENDED},
    err::{DisposedSnafu, Result},
    source::{DefaultMediaSourceFactory, MediaSourceFactory, PlaybackSource},
    state::{
        DraggingProgress, PlaybackState, PlayerState, QuickSeekAction, QuickSeekDirection,
        VideoSize,
    },
    surface::{RenderSurface, Rgba},
};

/// Drives a primary and a preview engine and publishes their status as
/// [`PlayerState`].
///
/// Cloning is cheap; clones share one controller. All commands are expected
/// to run on the player's scheduling context, and so are the engine
/// callbacks, position polling and debounced preview seeks.
#[derive(Clone)]
pub struct PlayerController {
    inner: Arc<Inner>,
}

struct Inner {
    config:         PlayerConfig,
    state:          Arc<PlayerState>,
    primary:        Mutex<Box<dyn MediaEngine>>,
    preview:        Mutex<Box<dyn MediaEngine>>,
    source_factory: Arc<dyn MediaSourceFactory>,
    binding:        Mutex<Binding>,
    polling:        Mutex<TaskSlot>,
    preview_seeks:  Debouncer<Duration>,
    preview_pump:   Mutex<Option<TaskHandle>>,
    next_token:     AtomicU64,
    disposed:       AtomicBool,
}

/// What the controller is currently bound to.
struct Binding {
    source:           PlaybackSource,
    surface:          Option<Arc<dyn RenderSurface>>,
    background_color: Rgba,
}

impl PlayerController {
    /// Build a controller over `engines` that will play `source`.
    ///
    /// Nothing is prepared until a render surface becomes available.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn new(engines: EnginePair, source: PlaybackSource, config: PlayerConfig) -> Self {
        Self::with_source_factory(
            engines,
            source,
            config,
            Arc::new(DefaultMediaSourceFactory),
        )
    }

    /// Like [`new`](Self::new), with a host-supplied media source factory.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn with_source_factory(
        engines: EnginePair,
        source: PlaybackSource,
        config: PlayerConfig,
        source_factory: Arc<dyn MediaSourceFactory>,
    ) -> Self {
        let EnginePair {
            mut primary,
            mut preview,
        } = engines;
        let state = Arc::new(PlayerState::default());

        primary.set_play_when_ready(config.auto_play);
        preview.set_play_when_ready(false);
        primary.set_listener(Arc::new(StateBridge {
            state: Arc::clone(&state),
        }));

        let inner = Arc::new(Inner {
            preview_seeks: Debouncer::new(config.preview_debounce()),
            config,
            state,
            primary: Mutex::new(primary),
            preview: Mutex::new(preview),
            source_factory,
            binding: Mutex::new(Binding {
                source,
                surface: None,
                background_color: Rgba::BLACK,
            }),
            polling: Mutex::new(TaskSlot::new()),
            preview_pump: Mutex::new(None),
            next_token: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        });
        start_preview_pump(&inner);

        PlayerController { inner }
    }

    pub fn state(&self) -> &PlayerState { &self.inner.state }

    pub fn config(&self) -> &PlayerConfig { &self.inner.config }

    pub fn source(&self) -> PlaybackSource { self.inner.binding.lock().source.clone() }

    /// Replace the media source.
    ///
    /// An unusable source is rejected and the current one stays bound. With a
    /// surface attached the engines are prepared right away; otherwise the
    /// first surface triggers the prepare. Fails once the controller is
    /// disposed.
    pub fn set_source(&self, source: PlaybackSource) -> Result<()> {
        ensure!(!self.is_disposed(), DisposedSnafu);
        self.inner.source_factory.create_media_source(&source)?;

        let attached = {
            let mut binding = self.inner.binding.lock();
            info!(from = %binding.source, to = %source, "binding playback source");
            binding.source = source;
            binding.surface.is_some()
        };

        if attached {
            self.prepare()
        } else {
            debug!("no surface yet, prepare deferred");
            Ok(())
        }
    }

    fn prepare(&self) -> Result<()> {
        ensure!(!self.is_disposed(), DisposedSnafu);
        let source = self.source();
        let primary_media = self.inner.source_factory.create_media_source(&source)?;
        let preview_media = self.inner.source_factory.create_media_source(&source)?;

        self.restart_position_polling();

        debug!(%source, uri = %primary_media.uri(), "preparing engines");
        self.inner.primary.lock().prepare(primary_media);
        self.inner.preview.lock().prepare(preview_media);
        Ok(())
    }

    fn restart_position_polling(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let period = self.inner.config.position_poll_interval();
        self.inner.polling.lock().restart(|| {
            spawn_interval("position-poll", period, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.refresh_positions();
                }
            })
        });
    }

    pub fn play(&self) {
        let mut primary = self.inner.primary.lock();
        if primary.playback_state_code() == STATE_ENDED {
            debug!("replaying from the start");
            primary.seek_to(0);
        }
        primary.set_play_when_ready(true);
    }

    pub fn pause(&self) { self.inner.primary.lock().set_play_when_ready(false); }

    pub fn play_pause_toggle(&self) {
        let playing = self.inner.primary.lock().is_playing();
        if playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seek the primary engine and publish the new position at once.
    pub fn seek_to(&self, position: Duration) {
        self.inner.primary.lock().seek_to(engine_millis(position));
        self.inner.refresh_positions();
    }

    pub fn quick_seek_forward(&self) { self.quick_seek(QuickSeekDirection::Forward); }

    pub fn quick_seek_rewind(&self) { self.quick_seek(QuickSeekDirection::Rewind); }

    /// Jump one step and publish a new quick-seek action.
    ///
    /// Ignored while the previous action is still being animated.
    fn quick_seek(&self, direction: QuickSeekDirection) {
        let pending = self.inner.state.quick_seek_action.get();
        if pending.is_active() {
            warn!(
                %direction,
                pending = %pending.direction,
                "quick seek ignored while animating"
            );
            return;
        }

        let step = engine_millis(self.inner.config.quick_seek_step());
        {
            let mut primary = self.inner.primary.lock();
            let position = primary.current_position_ms();
            let duration = primary.duration_ms();
            let target = match direction {
                // An unknown duration is negative and gives no upper bound.
                QuickSeekDirection::Forward if duration < 0 => position.saturating_add(step),
                QuickSeekDirection::Forward => position.saturating_add(step).min(duration),
                QuickSeekDirection::Rewind => position.saturating_sub(step),
                QuickSeekDirection::None => return,
            }
            .max(0);
            primary.seek_to(target);
        }
        self.inner.refresh_positions();

        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner
            .state
            .quick_seek_action
            .set(QuickSeekAction::new(direction, token));
    }

    /// Mark the current quick-seek animation as done.
    pub fn reset_quick_seek(&self) {
        self.inner
            .state
            .quick_seek_action
            .set(QuickSeekAction::none());
    }

    /// Ask the preview engine to show the frame near `position`.
    ///
    /// Positions are rounded down to an even second and debounced, so a
    /// scrub only seeks the preview engine once it settles.
    pub fn preview_seek_to(&self, position: Duration) {
        let seconds = position.as_secs();
        self.inner
            .preview_seeks
            .put(Duration::from_secs(seconds - seconds % 2));
    }

    pub fn set_dragging_progress(&self, progress: Option<DraggingProgress>) {
        self.inner.state.dragging_progress.set(progress);
    }

    pub fn enable_controls(&self, enabled: bool) { self.inner.state.controls_enabled.set(enabled); }

    pub fn enable_gestures(&self, enabled: bool) { self.inner.state.gestures_enabled.set(enabled); }

    pub fn show_controls(&self) { self.inner.state.controls_visible.set(true); }

    pub fn hide_controls(&self) { self.inner.state.controls_visible.set(false); }

    /// Background painted behind the video. Applied to the current surface
    /// and to every later one.
    pub fn set_background_color(&self, color: Rgba) {
        let surface = {
            let mut binding = self.inner.binding.lock();
            binding.background_color = color;
            binding.surface.clone()
        };
        if let Some(surface) = surface {
            surface.set_background_color(color);
        }
    }

    /// Hand the primary engine its render surface.
    ///
    /// The first surface triggers the deferred prepare of the bound source.
    /// Fails once the controller is disposed.
    pub fn surface_available(&self, surface: Arc<dyn RenderSurface>) -> Result<()> {
        ensure!(!self.is_disposed(), DisposedSnafu);
        let (first, color) = {
            let mut binding = self.inner.binding.lock();
            let first = binding.surface.replace(Arc::clone(&surface)).is_none();
            (first, binding.background_color)
        };
        surface.set_background_color(color);
        self.inner.primary.lock().attach_surface(surface);

        if first { self.prepare() } else { Ok(()) }
    }

    pub fn preview_surface_available(&self, surface: Arc<dyn RenderSurface>) {
        if self.is_disposed() {
            debug!("controller disposed, preview surface ignored");
            return;
        }
        debug!("preview surface attached");
        self.inner.preview.lock().attach_surface(surface);
    }

    /// Stop polling and release both engines.
    ///
    /// Safe to call more than once; later calls only make sure polling is
    /// stopped.
    pub fn dispose(&self) {
        let stopped = self.inner.polling.lock().cancel();
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            debug!(stopped, "controller already disposed");
            return;
        }

        if let Some(pump) = self.inner.preview_pump.lock().take() {
            pump.cancel();
        }
        self.inner.primary.lock().release();
        self.inner.preview.lock().release();
        info!(stopped, "controller disposed");
    }

    pub fn is_disposed(&self) -> bool { self.inner.disposed.load(Ordering::Acquire) }

    pub fn is_polling(&self) -> bool { self.inner.polling.lock().is_running() }

    pub fn polling_stats(&self) -> SlotStats { self.inner.polling.lock().stats() }
}

impl Inner {
    /// Publish engine duration, position and buffered position. Unknown or
    /// negative values are published as zero.
    fn refresh_positions(&self) {
        let (duration, position, buffered) = {
            let primary = self.primary.lock();
            (
                primary.duration_ms(),
                primary.current_position_ms(),
                primary.buffered_position_ms(),
            )
        };
        self.state.duration.set(published(duration));
        self.state.current_position.set(published(position));
        self.state.secondary_progress.set(published(buffered));
    }
}

fn start_preview_pump(inner: &Arc<Inner>) {
    let Some(seeks) = inner.preview_seeks.stream() else {
        warn!("preview seek stream already taken");
        return;
    };
    let weak = Arc::downgrade(inner);
    let pump = spawn("preview-seek", move |_ctx| async move {
        let mut seeks = std::pin::pin!(seeks);
        while let Some(position) = seeks.next().await {
            let Some(inner) = weak.upgrade() else { break };
            let position_ms = engine_millis(position);
            debug!(position_ms, "preview seek");
            inner.preview.lock().seek_to(position_ms);
        }
    });
    *inner.preview_pump.lock() = Some(pump);
}

impl MediaPlaybackControls for PlayerController {
    fn play(&self) { PlayerController::play(self); }

    fn pause(&self) { PlayerController::pause(self); }

    fn play_pause_toggle(&self) { PlayerController::play_pause_toggle(self); }

    fn quick_seek_forward(&self) { PlayerController::quick_seek_forward(self); }

    fn quick_seek_rewind(&self) { PlayerController::quick_seek_rewind(self); }

    fn seek_to(&self, position: Duration) { PlayerController::seek_to(self, position); }
}

/// Maps primary engine callbacks onto state cells.
struct StateBridge {
    state: Arc<PlayerState>,
}

impl EngineListener for StateBridge {
    fn on_player_state_changed(&self, play_when_ready: bool, state_code: i32) -> Result<()> {
        let playback_state = PlaybackState::from_code(state_code)
            .inspect_err(|err| error!(%err, state_code, "unmapped engine state"))?;
        self.state.is_playing.set(play_when_ready);
        self.state.playback_state.set(playback_state);
        Ok(())
    }

    fn on_video_size_changed(
        &self,
        width: u32,
        height: u32,
        _unapplied_rotation_degrees: i32,
        _pixel_width_height_ratio: f32,
    ) {
        self.state.video_size.set(VideoSize::new(width, height));
    }
}

fn published(ms: i64) -> Duration { Duration::from_millis(u64::try_from(ms).unwrap_or(0)) }

fn engine_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_engine_times_publish_as_zero() {
        assert_eq!(published(-1), Duration::ZERO);
        assert_eq!(published(crate::engine::TIME_UNSET), Duration::ZERO);
        assert_eq!(published(1_500), Duration::from_millis(1_500));
    }

    #[test]
    fn bridge_leaves_state_untouched_on_unknown_code() {
        let state = Arc::new(PlayerState::default());
        let bridge = StateBridge {
            state: Arc::clone(&state),
        };

        bridge.on_player_state_changed(true, 3).unwrap();
        assert!(state.is_playing.get());
        assert_eq!(state.playback_state.get(), PlaybackState::Ready);

        assert!(bridge.on_player_state_changed(false, 0).is_err());
        assert!(state.is_playing.get());
        assert_eq!(state.playback_state.get(), PlaybackState::Ready);
    }
}
