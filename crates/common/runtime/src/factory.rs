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

use std::sync::atomic::{AtomicUsize, Ordering};

use snafu::ResultExt;
use tokio::runtime::{Builder as TokioBuilder, Runtime};

use crate::{
    error::{self, Result},
    options::RuntimeOptions,
};

impl RuntimeOptions {
    /// Build a current-thread Tokio runtime with optional IO/time drivers.
    /// Blocking-pool threads get sequential names prefixed with
    /// `thread_name`.
    pub fn create(self) -> Result<Runtime> {
        let mut builder = TokioBuilder::new_current_thread();

        if self.enable_io {
            builder.enable_io();
        }

        if self.enable_time {
            builder.enable_time();
        }

        let counter = AtomicUsize::new(0);
        let thread_name = self.thread_name;
        builder.thread_name_fn(move || {
            let idx = counter.fetch_add(1, Ordering::SeqCst);
            format!("{thread_name}-{idx}")
        });

        builder.build().context(error::BuildSnafu)
    }
}

/// Build the single-threaded runtime that hosts a player loop, with all
/// drivers enabled.
pub fn create_current_thread_runtime(thread_name: impl Into<String>) -> Result<Runtime> {
    RuntimeOptions::builder()
        .thread_name(thread_name.into())
        .build()
        .create()
}
