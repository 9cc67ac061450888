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

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Tunables of a [`PlayerController`](crate::PlayerController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault, bon::Builder)]
#[serde(default)]
pub struct PlayerConfig {
    /// Period of the position/duration/buffered refresh while a source is
    /// prepared.
    #[default = 250]
    #[builder(default = 250)]
    pub position_poll_interval_ms: u64,

    /// Quiet window before a scrub position reaches the preview engine.
    #[default = 200]
    #[builder(default = 200)]
    pub preview_debounce_ms: u64,

    /// Offset applied by one quick-seek gesture.
    #[default = 10_000]
    #[builder(default = 10_000)]
    pub quick_seek_step_ms: u64,

    /// Start playback as soon as the primary engine is ready.
    #[default = true]
    #[builder(default = true)]
    pub auto_play: bool,
}

impl PlayerConfig {
    pub fn position_poll_interval(&self) -> Duration {
        Duration::from_millis(self.position_poll_interval_ms)
    }

    pub fn preview_debounce(&self) -> Duration { Duration::from_millis(self.preview_debounce_ms) }

    pub fn quick_seek_step(&self) -> Duration { Duration::from_millis(self.quick_seek_step_ms) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{"preview_debounce_ms": 50}"#).unwrap();
        assert_eq!(config.preview_debounce(), Duration::from_millis(50));
        assert_eq!(config.position_poll_interval(), Duration::from_millis(250));
        assert_eq!(config.quick_seek_step(), Duration::from_secs(10));
        assert!(config.auto_play);
    }

    #[test]
    fn builder_defaults_match_default() {
        assert_eq!(PlayerConfig::builder().build(), PlayerConfig::default());
    }
}
