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

//! Cooperative task scheduling for the player loop.
//!
//! - [`spawn`] / [`spawn_interval`]: cancellable tasks on the current Tokio
//!   runtime, returning an owning [`TaskHandle`]
//! - [`TaskSlot`]: at most one live task, cancelled before it is replaced
//! - [`Debouncer`]: latest-value-wins coalescing over a quiet window
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use reelkit_common_worker::{TaskSlot, spawn_interval};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut slot = TaskSlot::new();
//! slot.restart(|| spawn_interval("poll", Duration::from_millis(250), || println!("tick")));
//!
//! // Replacing the task cancels the previous one first.
//! slot.restart(|| spawn_interval("poll", Duration::from_millis(250), || println!("tock")));
//! slot.cancel();
//! # }
//! ```

mod context;
mod debounce;
mod driver;
mod handle;
mod metrics;
mod slot;
mod task;

pub use context::TaskContext;
pub use debounce::{DEFAULT_DEBOUNCE_WINDOW, Debouncer};
pub use handle::TaskHandle;
pub use slot::{SlotStats, TaskSlot};
pub use task::{spawn, spawn_interval};
