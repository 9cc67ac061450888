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
use tracing::warn;

use crate::{
    engine::{
        EngineListener, MediaEngine, STATE_BUFFERING, STATE_ENDED, STATE_IDLE, STATE_READY,
        TIME_UNSET,
    },
    err::Result,
    source::MediaSource,
    surface::RenderSurface,
};

/// How far ahead of the playhead a loaded simulation reports as buffered.
const BUFFER_AHEAD_MS: i64 = 15_000;

/// Command received by a [`SimulatedEngine`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Prepare(String),
    SetPlayWhenReady(bool),
    SeekTo(i64),
    AttachSurface,
    Release,
}

/// In-memory engine driven by explicit probe calls instead of a decoder.
///
/// Clones share one simulation, so a test or the CLI keeps a clone to drive
/// time and inspect calls while the controller owns another.
#[derive(Clone, Default)]
pub struct SimulatedEngine {
    shared: Arc<Mutex<Simulation>>,
}

struct Simulation {
    media_duration_ms: i64,
    play_when_ready:   bool,
    state_code:        i32,
    position_ms:       i64,
    duration_ms:       i64,
    buffered_ms:       i64,
    calls:             Vec<EngineCall>,
    listener:          Option<Arc<dyn EngineListener>>,
    surface:           Option<Arc<dyn RenderSurface>>,
    listener_errors:   Vec<String>,
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation {
            media_duration_ms: 0,
            play_when_ready:   false,
            state_code:        STATE_IDLE,
            position_ms:       0,
            duration_ms:       TIME_UNSET,
            buffered_ms:       0,
            calls:             Vec::new(),
            listener:          None,
            surface:           None,
            listener_errors:   Vec::new(),
        }
    }
}

impl Simulation {
    fn rebuffer(&mut self) {
        self.buffered_ms = self
            .position_ms
            .saturating_add(BUFFER_AHEAD_MS)
            .min(self.media_duration_ms);
    }
}

impl SimulatedEngine {
    /// A simulation whose media lasts `media_duration` once loaded.
    pub fn new(media_duration: Duration) -> Self {
        let engine = SimulatedEngine::default();
        engine.shared.lock().media_duration_ms = millis(media_duration);
        engine
    }

    /// Finish loading: the engine becomes ready and learns the duration.
    pub fn finish_loading(&self) {
        {
            let mut sim = self.shared.lock();
            sim.state_code = STATE_READY;
            sim.duration_ms = sim.media_duration_ms;
            sim.rebuffer();
        }
        self.notify_state();
    }

    /// Stall playback until [`finish_loading`](Self::finish_loading).
    pub fn start_buffering(&self) {
        self.shared.lock().state_code = STATE_BUFFERING;
        self.notify_state();
    }

    /// Move the playhead when playing. Reaching the end switches to ended.
    pub fn advance(&self, elapsed: Duration) {
        let ended = {
            let mut sim = self.shared.lock();
            if !(sim.play_when_ready && sim.state_code == STATE_READY) {
                return;
            }
            let end = if sim.duration_ms >= 0 { sim.duration_ms } else { i64::MAX };
            sim.position_ms = sim.position_ms.saturating_add(millis(elapsed)).min(end);
            sim.rebuffer();
            let ended = sim.position_ms >= end;
            if ended {
                sim.state_code = STATE_ENDED;
            }
            ended
        };
        if ended {
            self.notify_state();
        }
    }

    /// Report an arbitrary status code, returning what the listener said.
    pub fn emit_state_code(&self, code: i32) -> Result<()> {
        let (listener, play_when_ready) = {
            let mut sim = self.shared.lock();
            sim.state_code = code;
            (sim.listener.clone(), sim.play_when_ready)
        };
        match listener {
            Some(listener) => listener.on_player_state_changed(play_when_ready, code),
            None => Ok(()),
        }
    }

    pub fn emit_video_size(&self, width: u32, height: u32) {
        let listener = self.shared.lock().listener.clone();
        if let Some(listener) = listener {
            listener.on_video_size_changed(width, height, 0, 1.0);
        }
    }

    pub fn set_position_ms(&self, position_ms: i64) {
        let mut sim = self.shared.lock();
        sim.position_ms = position_ms;
        sim.rebuffer();
    }

    pub fn calls(&self) -> Vec<EngineCall> { self.shared.lock().calls.clone() }

    pub fn seeks(&self) -> Vec<i64> {
        self.shared
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::SeekTo(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// URIs passed to `prepare`, oldest first.
    pub fn prepared(&self) -> Vec<String> {
        self.shared
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Prepare(uri) => Some(uri.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn release_count(&self) -> usize {
        self.shared
            .lock()
            .calls
            .iter()
            .filter(|call| **call == EngineCall::Release)
            .count()
    }

    pub fn has_surface(&self) -> bool { self.shared.lock().surface.is_some() }

    pub fn has_listener(&self) -> bool { self.shared.lock().listener.is_some() }

    /// Errors the listener returned for status callbacks fired by the
    /// simulation itself.
    pub fn listener_errors(&self) -> Vec<String> { self.shared.lock().listener_errors.clone() }

    fn notify_state(&self) {
        let (listener, play_when_ready, code) = {
            let sim = self.shared.lock();
            (sim.listener.clone(), sim.play_when_ready, sim.state_code)
        };
        let Some(listener) = listener else { return };
        if let Err(err) = listener.on_player_state_changed(play_when_ready, code) {
            warn!(%err, code, "listener rejected state change");
            self.shared.lock().listener_errors.push(err.to_string());
        }
    }
}

impl MediaEngine for SimulatedEngine {
    fn prepare(&mut self, source: MediaSource) {
        {
            let mut sim = self.shared.lock();
            sim.calls.push(EngineCall::Prepare(source.uri().to_string()));
            sim.state_code = STATE_BUFFERING;
            sim.position_ms = 0;
            sim.duration_ms = TIME_UNSET;
            sim.buffered_ms = 0;
        }
        self.notify_state();
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        let changed = {
            let mut sim = self.shared.lock();
            sim.calls.push(EngineCall::SetPlayWhenReady(play_when_ready));
            let changed = sim.play_when_ready != play_when_ready;
            sim.play_when_ready = play_when_ready;
            changed
        };
        if changed {
            self.notify_state();
        }
    }

    fn play_when_ready(&self) -> bool { self.shared.lock().play_when_ready }

    fn is_playing(&self) -> bool {
        let sim = self.shared.lock();
        sim.play_when_ready && sim.state_code == STATE_READY
    }

    fn playback_state_code(&self) -> i32 { self.shared.lock().state_code }

    fn seek_to(&mut self, position_ms: i64) {
        let resumed = {
            let mut sim = self.shared.lock();
            sim.calls.push(EngineCall::SeekTo(position_ms));
            sim.position_ms = if sim.duration_ms >= 0 {
                position_ms.clamp(0, sim.duration_ms)
            } else {
                position_ms.max(0)
            };
            sim.rebuffer();
            let resumed = sim.state_code == STATE_ENDED && sim.position_ms < sim.duration_ms;
            if resumed {
                sim.state_code = STATE_READY;
            }
            resumed
        };
        if resumed {
            self.notify_state();
        }
    }

    fn current_position_ms(&self) -> i64 { self.shared.lock().position_ms }

    fn duration_ms(&self) -> i64 { self.shared.lock().duration_ms }

    fn buffered_position_ms(&self) -> i64 { self.shared.lock().buffered_ms }

    fn set_listener(&mut self, listener: Arc<dyn EngineListener>) {
        self.shared.lock().listener = Some(listener);
    }

    fn attach_surface(&mut self, surface: Arc<dyn RenderSurface>) {
        let mut sim = self.shared.lock();
        sim.calls.push(EngineCall::AttachSurface);
        sim.surface = Some(surface);
    }

    fn release(&mut self) {
        let mut sim = self.shared.lock();
        sim.calls.push(EngineCall::Release);
        sim.state_code = STATE_IDLE;
        sim.listener = None;
        sim.surface = None;
    }
}

fn millis(duration: Duration) -> i64 { i64::try_from(duration.as_millis()).unwrap_or(i64::MAX) }

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn media() -> MediaSource { MediaSource::new(Url::parse("https://example.com/a.mp4").unwrap()) }

    #[test]
    fn loads_plays_and_ends() {
        let mut engine = SimulatedEngine::new(Duration::from_secs(2));
        engine.prepare(media());
        assert_eq!(engine.playback_state_code(), STATE_BUFFERING);
        assert_eq!(engine.duration_ms(), TIME_UNSET);

        engine.finish_loading();
        assert_eq!(engine.duration_ms(), 2_000);
        assert!(!engine.is_playing());

        engine.set_play_when_ready(true);
        assert!(engine.is_playing());
        engine.advance(Duration::from_millis(1_500));
        assert_eq!(engine.current_position_ms(), 1_500);
        assert_eq!(engine.buffered_position_ms(), 2_000);

        engine.advance(Duration::from_secs(1));
        assert_eq!(engine.current_position_ms(), 2_000);
        assert_eq!(engine.playback_state_code(), STATE_ENDED);
        assert!(!engine.is_playing());

        engine.seek_to(0);
        assert_eq!(engine.playback_state_code(), STATE_READY);
    }

    #[test]
    fn seeks_clamp_to_known_duration() {
        let mut engine = SimulatedEngine::new(Duration::from_secs(10));
        engine.prepare(media());
        engine.seek_to(-50);
        assert_eq!(engine.current_position_ms(), 0);
        engine.finish_loading();
        engine.seek_to(60_000);
        assert_eq!(engine.current_position_ms(), 10_000);
        assert_eq!(engine.seeks(), vec![-50, 60_000]);
    }

    #[test]
    fn paused_engine_does_not_advance() {
        let mut engine = SimulatedEngine::new(Duration::from_secs(10));
        engine.prepare(media());
        engine.finish_loading();
        engine.advance(Duration::from_secs(1));
        assert_eq!(engine.current_position_ms(), 0);
    }

    #[test]
    fn release_is_recorded() {
        let mut engine = SimulatedEngine::new(Duration::from_secs(1));
        engine.release();
        assert_eq!(engine.release_count(), 1);
        assert_eq!(engine.calls(), vec![EngineCall::Release]);
    }
}
