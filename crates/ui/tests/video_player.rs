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

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use reelkit_common_telemetry::init_default_ut_logging;
use reelkit_player::{
    EnginePair, Error as PlayerError, PlaybackSource, PlayerConfig, QuickSeekDirection,
    RenderSurface, Rgba, SimulatedEngine, engine::STATE_ENDED,
};
use reelkit_ui::{
    ChildNode, Error, VideoPlayer, VideoPlayerProps,
    components::{PlayPauseIcon, TapSide},
};
use tokio::time::sleep;

const CLIP: &str = "https://example.com/clip.mp4";

#[derive(Default)]
struct RecordingSurface {
    colors: Mutex<Vec<Rgba>>,
}

impl RenderSurface for RecordingSurface {
    fn set_background_color(&self, color: Rgba) { self.colors.lock().push(color); }
}

struct Mounted {
    player:  VideoPlayer,
    primary: SimulatedEngine,
    preview: SimulatedEngine,
}

fn mount(props: VideoPlayerProps) -> Mounted {
    init_default_ut_logging();
    let primary = SimulatedEngine::new(Duration::from_secs(60));
    let preview = SimulatedEngine::new(Duration::from_secs(60));
    let player = VideoPlayer::mount(
        props,
        EnginePair::new(primary.clone(), preview.clone()),
        PlayerConfig::default(),
    )
    .unwrap();
    Mounted {
        player,
        primary,
        preview,
    }
}

async fn mounted_and_loaded() -> Mounted {
    let m = mount(VideoPlayerProps::new(PlaybackSource::network(CLIP)));
    m.player
        .surface_available(Arc::new(RecordingSurface::default()))
        .unwrap();
    m.primary.finish_loading();
    sleep(Duration::from_millis(1)).await;
    m
}

#[tokio::test(start_paused = true)]
async fn mount_applies_props_and_waits_for_a_surface() {
    let accent = Rgba::from_hex(0x20_30_40);
    let props = VideoPlayerProps::builder()
        .source(PlaybackSource::network(CLIP))
        .background_color(accent)
        .controls_enabled(false)
        .controls_visible(false)
        .gestures_enabled(false)
        .build();
    let m = mount(props);

    let state = m.player.context().state();
    assert!(!state.controls_enabled().get());
    assert!(!state.controls_visible().get());
    assert!(!state.gestures_enabled().get());
    assert!(m.primary.prepared().is_empty());

    let surface = Arc::new(RecordingSurface::default());
    m.player.surface_available(surface.clone()).unwrap();
    assert_eq!(*surface.colors.lock(), vec![accent]);
    assert_eq!(m.primary.prepared(), vec![CLIP]);
}

#[tokio::test(start_paused = true)]
async fn mount_with_unusable_source_fails_and_releases_engines() {
    let primary = SimulatedEngine::new(Duration::from_secs(1));
    let preview = SimulatedEngine::new(Duration::from_secs(1));
    let result = VideoPlayer::mount(
        VideoPlayerProps::new(PlaybackSource::network("no scheme here")),
        EnginePair::new(primary.clone(), preview.clone()),
        PlayerConfig::default(),
    );

    assert!(matches!(result, Err(Error::Player {
        source: PlayerError::InvalidSourceUrl { .. },
        ..
    })));
    assert_eq!(primary.release_count(), 1);
    assert_eq!(preview.release_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn update_applies_only_what_changed() {
    let mut m = mounted_and_loaded().await;
    let props = m.player.props().clone();

    m.player.update(props.clone()).unwrap();
    assert_eq!(m.primary.prepared().len(), 1);

    let next = VideoPlayerProps {
        source: PlaybackSource::Resource(9),
        controls_visible: false,
        ..props
    };
    m.player.update(next).unwrap();
    assert_eq!(m.primary.prepared(), vec![CLIP, "rawresource:///9"]);
    assert!(!m.player.context().state().controls_visible().get());
    assert_eq!(m.player.props().source, PlaybackSource::Resource(9));
}

#[tokio::test(start_paused = true)]
async fn rejected_update_keeps_previous_props() {
    let mut m = mounted_and_loaded().await;
    let before = m.player.props().clone();

    let err = m
        .player
        .update(VideoPlayerProps {
            controls_enabled: false,
            ..VideoPlayerProps::new(PlaybackSource::network("::bad::"))
        })
        .unwrap_err();
    assert!(matches!(err, Error::Player { .. }));
    assert_eq!(m.player.props(), &before);
    assert!(m.player.context().state().controls_enabled().get());
}

#[tokio::test(start_paused = true)]
async fn dispose_and_drop_release_once() {
    let mut m = mounted_and_loaded().await;
    m.player.dispose();
    m.player.dispose();
    assert!(m.player.context().controller().is_disposed());

    let Mounted {
        player,
        primary,
        preview,
    } = m;
    drop(player);
    assert_eq!(primary.release_count(), 1);
    assert_eq!(preview.release_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn update_after_dispose_is_ignored() {
    let mut m = mounted_and_loaded().await;
    m.player.dispose();

    let next = VideoPlayerProps {
        source: PlaybackSource::Resource(4),
        controls_enabled: false,
        ..m.player.props().clone()
    };
    m.player.update(next).unwrap();

    assert_eq!(m.player.props().source, PlaybackSource::network(CLIP));
    assert!(m.player.context().state().controls_enabled().get());
    assert_eq!(m.primary.prepared(), vec![CLIP]);
    assert!(!m.player.context().controller().is_polling());
}

#[tokio::test(start_paused = true)]
async fn drop_disposes_the_controller() {
    let m = mounted_and_loaded().await;
    let Mounted {
        player, primary, ..
    } = m;
    drop(player);
    assert_eq!(primary.release_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn layout_follows_video_size() {
    let m = mounted_and_loaded().await;
    let layout = m.player.layout();
    assert_eq!(layout.background_color, Rgba::BLACK);
    assert_eq!(layout.content_color, Rgba::WHITE);
    assert_eq!(layout.children, vec![
        ChildNode::Surface,
        ChildNode::Gestures,
        ChildNode::Buttons,
        ChildNode::Progress,
    ]);
    let ratio = layout.aspect_ratio.unwrap();
    assert!((ratio - 16.0 / 9.0).abs() < 1e-6);

    m.primary.emit_video_size(1280, 0);
    assert_eq!(m.player.layout().aspect_ratio, None);
}

#[tokio::test(start_paused = true)]
async fn controls_handle_drives_the_player() {
    let m = mounted_and_loaded().await;
    let controls = m.player.controls();

    controls.seek_to(Duration::from_secs(12));
    assert_eq!(
        m.player.context().state().current_position().get(),
        Duration::from_secs(12)
    );

    controls.pause();
    assert!(!m.player.context().state().is_playing().get());
    controls.play();
    assert!(m.player.context().state().is_playing().get());
}

#[tokio::test(start_paused = true)]
async fn progress_shows_played_and_buffered_shares() {
    let m = mounted_and_loaded().await;
    m.player.controls().seek_to(Duration::from_secs(30));

    let view = m.player.progress_indicator().view();
    assert!((view.played - 0.5).abs() < 1e-6);
    assert!((view.buffered - 0.75).abs() < 1e-6);
    assert!(!view.dragging);
    assert_eq!(view.time_label(), "0:30/1:00");
}

#[tokio::test(start_paused = true)]
async fn dragging_scrubs_the_preview_and_seeks_on_release() {
    let m = mounted_and_loaded().await;
    let gestures = m.player.gestures();
    let progress = m.player.progress_indicator();

    assert!(gestures.drag_start());
    assert!(gestures.drag_update(0.1));
    assert!(gestures.drag_update(0.25));
    let view = progress.view();
    assert!(view.dragging);
    assert_eq!(view.position, Duration::from_secs(15));
    assert!((view.played - 0.25).abs() < 1e-6);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(m.preview.seeks(), vec![14_000]);
    assert!(m.primary.seeks().is_empty());

    gestures.drag_end();
    assert_eq!(m.primary.seeks(), vec![15_000]);
    assert!(!progress.view().dragging);
}

#[tokio::test(start_paused = true)]
async fn buttons_reflect_playback() {
    let m = mounted_and_loaded().await;
    let buttons = m.player.buttons();
    assert_eq!(buttons.view().icon, PlayPauseIcon::Pause);

    assert!(buttons.press_play_pause());
    assert_eq!(buttons.view().icon, PlayPauseIcon::Play);

    m.primary.emit_state_code(STATE_ENDED).unwrap();
    assert_eq!(buttons.view().icon, PlayPauseIcon::Replay);

    m.player.context().controller().hide_controls();
    assert!(!buttons.view().visible);
    assert!(!buttons.press_play_pause());
}

#[tokio::test(start_paused = true)]
async fn taps_toggle_controls_unless_disabled() {
    let mut m = mounted_and_loaded().await;
    let gestures = m.player.gestures();
    let state = m.player.context().state();

    assert!(gestures.tap());
    assert!(!state.controls_visible().get());
    assert!(gestures.tap());
    assert!(state.controls_visible().get());

    let props = VideoPlayerProps {
        gestures_enabled: false,
        ..m.player.props().clone()
    };
    m.player.update(props).unwrap();
    let gestures = m.player.gestures();
    assert!(!gestures.tap());
    assert!(!gestures.double_tap(TapSide::Right));
    assert!(m.primary.seeks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn quick_seek_animation_runs_once_per_action() {
    let m = mounted_and_loaded().await;
    let mut gestures = m.player.gestures();

    assert!(gestures.double_tap(TapSide::Right));
    let action = gestures.take_quick_seek_animation().unwrap();
    assert_eq!(action.direction, QuickSeekDirection::Forward);
    assert_eq!(gestures.take_quick_seek_animation(), None);
    assert_eq!(m.primary.seeks(), vec![10_000]);

    gestures.quick_seek_animation_finished();
    assert!(gestures.double_tap(TapSide::Left));
    let action = gestures.take_quick_seek_animation().unwrap();
    assert_eq!(action.direction, QuickSeekDirection::Rewind);
    assert_eq!(action.token, 2);
    assert_eq!(m.primary.seeks(), vec![10_000, 0]);
}
