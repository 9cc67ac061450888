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

//! Runtime construction for the player loop.
//!
//! Controller commands, engine callbacks, position polling and debounced
//! preview seeks all share one cooperative scheduling context. In production
//! that context is the current-thread runtime built here.

mod error;
mod factory;
mod options;

pub use error::{Error, Result};
pub use factory::create_current_thread_runtime;
pub use options::RuntimeOptions;
pub use tokio::{runtime::Runtime, task::JoinHandle};
