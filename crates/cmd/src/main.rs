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

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};
use reelkit_common_runtime::create_current_thread_runtime;
use reelkit_common_telemetry::{
    DEFAULT_LOGGING_DIR, LogFormat, LoggingOptions, init_global_logging, set_panic_hook,
    validate_log_level,
};
use reelkit_player::{
    DefaultMediaSourceFactory, EnginePair, MediaSourceFactory, PlaybackSource, PlaybackState,
    PlayerConfig, PlayerSnapshot, RenderSurface, Rgba, SimulatedEngine,
};
use reelkit_ui::{VideoPlayer, VideoPlayerProps};
use snafu::{ResultExt, Whatever};
use tracing::{debug, info};

/// Step of the simulated playback clock.
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[clap(name = "reelkit", about = "reelkit-cmd", version)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Resolve(ResolveArgs),
    Play(PlayArgs),
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Print the media URI a playback source resolves to.
Examples:

reelkit resolve res:42
reelkit resolve https://example.com/clip.mp4

")]
struct ResolveArgs {
    /// `res:<id>` for a bundled resource, anything else is a URL.
    source: String,
}

impl ResolveArgs {
    fn run(&self) -> Result<(), Whatever> {
        let source: PlaybackSource = self
            .source
            .parse()
            .whatever_context("Invalid playback source")?;
        let media = DefaultMediaSourceFactory
            .create_media_source(&source)
            .whatever_context("Failed to resolve playback source")?;
        println!("{}", media.uri());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QuickSeek {
    Forward,
    Rewind,
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Play a source on simulated engines and log every published state change.
Examples:

reelkit play https://example.com/clip.mp4 --duration-secs 20
reelkit play res:7 --seek-ms 15000 --quick-seek rewind

")]
struct PlayArgs {
    source: String,

    /// JSON player config; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Length of the simulated media.
    #[arg(long, default_value_t = 30)]
    duration_secs: u64,

    /// Simulated loading time before the engines become ready.
    #[arg(long, default_value_t = 500)]
    load_delay_ms: u64,

    /// Seek here once playback started.
    #[arg(long)]
    seek_ms: Option<u64>,

    #[arg(long, value_enum)]
    quick_seek: Option<QuickSeek>,

    /// Stop after this long even if playback has not ended.
    #[arg(long, default_value_t = 60)]
    run_for_secs: u64,

    #[arg(long)]
    log_level: Option<String>,

    /// Also write hourly log files here; `--log-dir` alone uses `logs`.
    #[arg(
        long,
        default_value = "",
        num_args = 0..=1,
        default_missing_value = DEFAULT_LOGGING_DIR
    )]
    log_dir: String,

    #[arg(long)]
    json_logs: bool,
}

impl PlayArgs {
    fn run(&self) -> Result<(), Whatever> {
        let logging = self.logging_options()?;
        let _guards = init_global_logging("reelkit", &logging);
        set_panic_hook();

        let config = self.load_config()?;
        let runtime = create_current_thread_runtime("reelkit-player")
            .whatever_context("Failed to build player runtime")?;
        runtime.block_on(self.play(config))
    }

    fn logging_options(&self) -> Result<LoggingOptions, Whatever> {
        if let Some(level) = &self.log_level {
            validate_log_level(level)
                .with_whatever_context(|_| format!("Invalid log level '{level}'"))?;
        }
        Ok(LoggingOptions {
            dir: self.log_dir.clone(),
            level: self.log_level.clone(),
            log_format: if self.json_logs {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            ..Default::default()
        })
    }

    fn load_config(&self) -> Result<PlayerConfig, Whatever> {
        let Some(path) = &self.config else {
            return Ok(PlayerConfig::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_whatever_context(|_| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_whatever_context(|_| format!("Invalid player config in {}", path.display()))
    }

    async fn play(&self, config: PlayerConfig) -> Result<(), Whatever> {
        let source: PlaybackSource = self
            .source
            .parse()
            .whatever_context("Invalid playback source")?;
        let media_duration = Duration::from_secs(self.duration_secs);
        let primary = SimulatedEngine::new(media_duration);
        let preview = SimulatedEngine::new(media_duration);

        let mut player = VideoPlayer::mount(
            VideoPlayerProps::new(source),
            EnginePair::new(primary.clone(), preview.clone()),
            config,
        )
        .whatever_context("Failed to mount video player")?;
        player
            .surface_available(Arc::new(LoggingSurface { name: "primary" }))
            .whatever_context("Failed to prepare playback")?;
        player.preview_surface_available(Arc::new(LoggingSurface { name: "preview" }));

        tokio::time::sleep(Duration::from_millis(self.load_delay_ms)).await;
        primary.finish_loading();
        preview.finish_loading();

        let controls = player.controls();
        controls.play();
        if let Some(ms) = self.seek_ms {
            controls.seek_to(Duration::from_millis(ms));
        }
        match self.quick_seek {
            Some(QuickSeek::Forward) => controls.quick_seek_forward(),
            Some(QuickSeek::Rewind) => controls.quick_seek_rewind(),
            None => {}
        }

        let state = player.context().state();
        let mut gestures = player.gestures();
        let mut last = state.snapshot();
        info!(?last, "playback started");

        let mut ticker = tokio::time::interval(TICK);
        let deadline = tokio::time::sleep(Duration::from_secs(self.run_for_secs));
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(deadline, ctrl_c);

        loop {
            tokio::select! {
                () = &mut deadline => {
                    info!("run time elapsed");
                    break;
                }
                res = &mut ctrl_c => {
                    res.whatever_context("Failed to listen for ctrl-c")?;
                    info!("interrupted");
                    break;
                }
                _ = ticker.tick() => {
                    primary.advance(TICK);
                    if let Some(action) = gestures.take_quick_seek_animation() {
                        info!(direction = %action.direction, token = action.token, "quick seek");
                        gestures.quick_seek_animation_finished();
                    }

                    let now = state.snapshot();
                    log_changes(&last, &now);
                    last = now;
                    if now.playback_state == PlaybackState::Ended {
                        info!("playback ended");
                        break;
                    }
                }
            }
        }

        player.dispose();
        Ok(())
    }
}

fn log_changes(before: &PlayerSnapshot, after: &PlayerSnapshot) {
    if before == after {
        return;
    }
    if before.playback_state != after.playback_state
        || before.is_playing != after.is_playing
        || before.video_size != after.video_size
    {
        info!(
            state = %after.playback_state,
            playing = after.is_playing,
            size = %after.video_size,
            "playback changed"
        );
    }
    debug!(
        position_ms = after.current_position.as_millis(),
        duration_ms = after.duration.as_millis(),
        buffered_ms = after.secondary_progress.as_millis(),
        "progress"
    );
}

/// Surface that only logs what is painted on it.
struct LoggingSurface {
    name: &'static str,
}

impl RenderSurface for LoggingSurface {
    fn set_background_color(&self, color: Rgba) {
        debug!(surface = self.name, ?color, "background color");
    }
}

fn main() -> Result<(), Whatever> {
    let cli = Cli::parse();
    match cli.commands {
        Commands::Resolve(ra) => ra.run(),
        Commands::Play(pa) => pa.run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_args(extra: &[&str]) -> PlayArgs {
        let args = ["reelkit", "play", "res:1"].iter().chain(extra).copied();
        match Cli::parse_from(args).commands {
            Commands::Play(pa) => pa,
            Commands::Resolve(_) => unreachable!(),
        }
    }

    #[test]
    fn bad_log_level_is_an_error() {
        let err = play_args(&["--log-level", "reelkit_player=loud"])
            .logging_options()
            .unwrap_err();
        assert!(err.to_string().contains("reelkit_player=loud"));
    }

    #[test]
    fn logging_flags_map_to_options() {
        let opts = play_args(&["--log-level", "debug", "--log-dir", "--json-logs"])
            .logging_options()
            .unwrap();
        assert_eq!(opts.level.as_deref(), Some("debug"));
        assert_eq!(opts.dir, DEFAULT_LOGGING_DIR);
        assert_eq!(opts.log_format, LogFormat::Json);

        let opts = play_args(&[]).logging_options().unwrap();
        assert!(opts.dir.is_empty());
        assert_eq!(opts.level, None);
    }
}
