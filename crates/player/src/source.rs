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

use std::str::FromStr;

use snafu::{ResultExt, ensure};
use url::Url;

use crate::err::{Error, InvalidSourceSnafu, InvalidSourceUrlSnafu, Result};

/// URI scheme for media bundled with the host application.
pub const RAW_RESOURCE_SCHEME: &str = "rawresource";

const RESOURCE_PREFIX: &str = "res:";

/// Where the media comes from. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlaybackSource {
    /// Media bundled with the host, addressed by resource id.
    #[display("res:{_0}")]
    Resource(u32),
    /// Remote media, addressed by URL.
    #[display("{_0}")]
    Network(String),
}

impl PlaybackSource {
    pub fn network(url: impl Into<String>) -> Self { PlaybackSource::Network(url.into()) }
}

/// Parses `res:<id>` as a resource and anything else as a network URL.
///
/// The URL itself is validated when a media source is built from it.
impl FromStr for PlaybackSource {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        ensure!(!trimmed.is_empty(), InvalidSourceSnafu {
            input,
            message: "empty source",
        });

        match trimmed.strip_prefix(RESOURCE_PREFIX) {
            Some(id) => id.parse().map(PlaybackSource::Resource).map_err(|e| {
                InvalidSourceSnafu {
                    input,
                    message: format!("bad resource id: {e}"),
                }
                .build()
            }),
            None => Ok(PlaybackSource::network(trimmed)),
        }
    }
}

/// Engine-ready description of the media to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    uri: Url,
}

impl MediaSource {
    pub fn new(uri: Url) -> Self { MediaSource { uri } }

    pub fn uri(&self) -> &Url { &self.uri }
}

/// Builds engine media sources from playback sources.
///
/// The host supplies the data-access side (network stack, resource lookup);
/// the controller asks for a fresh media source per engine on every prepare.
pub trait MediaSourceFactory: Send + Sync {
    fn create_media_source(&self, source: &PlaybackSource) -> Result<MediaSource>;
}

/// Resolves resources to `rawresource:///<id>` and parses network URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMediaSourceFactory;

impl MediaSourceFactory for DefaultMediaSourceFactory {
    fn create_media_source(&self, source: &PlaybackSource) -> Result<MediaSource> {
        let uri = match source {
            PlaybackSource::Resource(id) => resource_uri(*id)?,
            PlaybackSource::Network(url) => {
                Url::parse(url).context(InvalidSourceUrlSnafu { url: url.clone() })?
            }
        };
        Ok(MediaSource::new(uri))
    }
}

/// URI of a bundled resource.
pub fn resource_uri(id: u32) -> Result<Url> {
    let raw = format!("{RAW_RESOURCE_SCHEME}:///{id}");
    Url::parse(&raw).context(InvalidSourceUrlSnafu { url: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_resolve_to_raw_resource_uris() {
        let media = DefaultMediaSourceFactory
            .create_media_source(&PlaybackSource::Resource(42))
            .unwrap();
        assert_eq!(media.uri().scheme(), RAW_RESOURCE_SCHEME);
        assert_eq!(media.uri().path(), "/42");
    }

    #[test]
    fn network_urls_are_parsed() {
        let media = DefaultMediaSourceFactory
            .create_media_source(&PlaybackSource::network("https://example.com/clip.mp4"))
            .unwrap();
        assert_eq!(media.uri().host_str(), Some("example.com"));
        assert_eq!(media.uri().path(), "/clip.mp4");
    }

    #[test]
    fn malformed_network_urls_are_rejected() {
        let err = DefaultMediaSourceFactory
            .create_media_source(&PlaybackSource::network("not a url"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSourceUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn parses_source_strings() {
        assert_eq!(
            "res:7".parse::<PlaybackSource>().unwrap(),
            PlaybackSource::Resource(7)
        );
        assert_eq!(
            "https://example.com/a.mp4".parse::<PlaybackSource>().unwrap(),
            PlaybackSource::network("https://example.com/a.mp4")
        );
        assert!("res:abc".parse::<PlaybackSource>().is_err());
        assert!("   ".parse::<PlaybackSource>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for source in [
            PlaybackSource::Resource(3),
            PlaybackSource::network("https://example.com/v.mp4"),
        ] {
            assert_eq!(source.to_string().parse::<PlaybackSource>().unwrap(), source);
        }
    }
}
