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

use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The engine reported a status code outside the known state table.
    #[snafu(display("Engine reported unknown playback state code {code}"))]
    UnknownPlaybackState { code: i32 },

    #[snafu(display("Invalid media source url '{url}'"))]
    InvalidSourceUrl {
        url:    String,
        source: url::ParseError,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Invalid playback source '{input}': {message}"))]
    InvalidSource { input: String, message: String },

    /// The controller was disposed and its engines released.
    #[snafu(display("Player controller is disposed"))]
    Disposed,
}
